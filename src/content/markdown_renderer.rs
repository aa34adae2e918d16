use std::io;
use std::io::ErrorKind;

use markdown::{CompileOptions, Options, ParseOptions};

/// Stage 1: GFM markdown to semantic HTML. Raw HTML embedded in the source
/// passes through unchanged; post authors are trusted, this is not a
/// public-submission pipeline.
pub fn to_html(body: &str) -> io::Result<String> {
    let options = Options {
        parse: ParseOptions::gfm(),
        compile: CompileOptions {
            allow_dangerous_html: true,
            ..CompileOptions::gfm()
        },
    };

    match markdown::to_html_with_options(body, &options) {
        Ok(html) => Ok(html),
        Err(e) => Err(io::Error::new(ErrorKind::InvalidInput, e.reason.as_str())),
    }
}
