use std::io;
use std::sync::Arc;

use chrono::Utc;
use ntex::web;
use ntex::web::HttpRequest;
use ntex_files::NamedFile;
use serde_json::json;
use spdlog::info;

use crate::config::Config;
use crate::query_string::QueryString;
use crate::repository::Repository;
use crate::resolver::DirectoryResolver;

const DEFAULT_RELATED_LIMIT: usize = 3;

struct AppState {
    repo: Repository,
    config: Config,
}

fn query(req: &HttpRequest) -> QueryString {
    QueryString::from(req.uri().query().unwrap_or(""))
}

#[web::get("/api/posts")]
async fn list_posts(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let posts = state.repo.list_all();
    web::HttpResponse::Ok().json(&*posts)
}

#[web::get("/api/posts/featured")]
async fn featured_posts(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&state.repo.get_featured())
}

#[web::get("/api/posts/{slug}")]
async fn post_by_slug(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    let slug = path.into_inner();
    match state.repo.get_by_slug(&slug) {
        Some(post) => web::HttpResponse::Ok().json(&post),
        None => web::HttpResponse::NotFound().json(&json!({
            "error": format!("Post not found: {}", slug)
        })),
    }
}

#[web::get("/api/posts/{slug}/related")]
async fn related_posts(
    req: HttpRequest,
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    let slug = path.into_inner();
    let Some(post) = state.repo.get_by_slug(&slug) else {
        return web::HttpResponse::NotFound().json(&json!({
            "error": format!("Post not found: {}", slug)
        }));
    };

    let limit = query(&req).get_limit(DEFAULT_RELATED_LIMIT);
    web::HttpResponse::Ok().json(&state.repo.get_related(&post, limit))
}

#[web::get("/api/categories")]
async fn list_categories(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&state.repo.categories())
}

#[web::get("/api/categories/{category}")]
async fn posts_by_category(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&state.repo.get_by_category(&path.into_inner()))
}

#[web::get("/api/tags")]
async fn list_tags(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    web::HttpResponse::Ok().json(&state.repo.tags())
}

#[web::get("/api/search")]
async fn search_posts(
    req: HttpRequest,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    let qs = query(&req);
    let term = qs.get("q").unwrap_or("").trim();
    if term.is_empty() {
        return web::HttpResponse::BadRequest().json(&json!({
            "error": "Query parameter 'q' is required"
        }));
    }
    web::HttpResponse::Ok().json(&state.repo.search(term))
}

fn refresh(req: &HttpRequest, state: &AppState) -> web::HttpResponse {
    let qs = query(req);

    let expected = state.config.server.refresh_secret.as_deref();
    let provided = qs.get("secret");
    let authorized = matches!((expected, provided), (Some(want), Some(got)) if want == got);
    if !authorized {
        return web::HttpResponse::Unauthorized().json(&json!({
            "error": "Invalid secret"
        }));
    }

    let path = qs.get("path").unwrap_or("/blog");
    let epoch = state.repo.invalidate();
    info!("Refresh requested for {}", path);

    web::HttpResponse::Ok().json(&json!({
        "success": true,
        "message": format!("Cache invalidated for {}", path),
        "epoch": epoch,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

// The CMS webhook posts here; manual refreshes tend to arrive as GET
#[web::get("/api/refresh")]
async fn refresh_get(
    req: HttpRequest,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    refresh(&req, &state)
}

#[web::post("/api/refresh")]
async fn refresh_post(
    req: HttpRequest,
    state: web::types::State<Arc<AppState>>,
) -> web::HttpResponse {
    refresh(&req, &state)
}

#[web::get("/public/{file_name}")]
async fn public_files(
    path: web::types::Path<String>,
    state: web::types::State<Arc<AppState>>,
) -> Result<NamedFile, web::Error> {
    if path.contains("../") {
        return Err(web::error::ErrorUnauthorized("Access forbidden").into());
    }

    let file_path = state.config.paths.public_dir.join(path.into_inner());
    Ok(NamedFile::open(file_path)?)
}

pub async fn server_run(config: Config) -> io::Result<()> {
    let resolver = DirectoryResolver::new(
        config.content.posts_dir_env_name(),
        config.paths.posts_dirs.clone(),
    );
    let repo = Repository::new(resolver, config.content.cache_enabled);

    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    let app_state = Arc::new(AppState { repo, config });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(list_posts)
            .service(featured_posts)
            .service(related_posts)
            .service(post_by_slug)
            .service(list_categories)
            .service(posts_by_category)
            .service(list_tags)
            .service(search_posts)
            .service(refresh_get)
            .service(refresh_post)
            .service(public_files)
    })
    .bind((bind_addr, bind_port))?
    .run()
    .await
}
