//! Turns a parsed request into a response for the document root.

use std::fs::File;
use std::io;

use tracing::{debug, warn};

use crate::docroot::{DirectoryListing, DocumentRoot, Resource};
use crate::http::mime::HTML_MIME_TYPE;
use crate::http::request::Request;
use crate::http::response::{Body, Response, ResponseBuilder, StatusCode};

/// Produces the response for `request`.
///
/// Non-GET methods get 405. A directory named without its trailing slash is
/// redirected to the slashed form. Every error response ends the pipeline;
/// nothing is looked up after one has been chosen.
pub fn respond(docroot: &DocumentRoot, request: &Request) -> Response {
    if !request.is_get() {
        let mut response = Response::error(StatusCode::MethodNotAllowed, "Only GET is supported");
        response.headers.push(("Allow".to_string(), "GET".to_string()));
        return response;
    }

    if request.raw_path.is_empty() {
        return Response::error(StatusCode::BadRequest, "Missing request path");
    }

    let resource = match docroot.resolve(&request.path) {
        Ok(r) => r,
        Err(e) => return filesystem_error(request, &e),
    };

    match resource {
        Resource::Missing => {
            debug!(path = %request.display_path(), "not found");
            Response::not_found()
        }
        Resource::Forbidden => Response::error(StatusCode::Forbidden, "Access denied"),
        Resource::Special => Response::error(
            StatusCode::Forbidden,
            "Not a regular file or directory",
        ),
        Resource::Directory { .. } if !request.path.ends_with(b"/") => {
            // relative links in the listing need the trailing slash
            Response::redirect(&with_trailing_slash(&request.raw_path))
        }
        Resource::Directory { entries } => {
            debug!(path = %request.display_path(), entries = entries.len(), "serving directory");
            ResponseBuilder::new(StatusCode::Ok)
                .header("Content-Type", HTML_MIME_TYPE)
                .body(Body::Listing(DirectoryListing::new(
                    request.display_path(),
                    entries,
                )))
                .build()
        }
        Resource::File {
            path,
            size,
            content_type,
        } => match File::open(&path) {
            Ok(file) => {
                debug!(path = %path.display(), size, "serving file");
                ResponseBuilder::new(StatusCode::Ok)
                    .header("Content-Type", content_type)
                    .body(Body::File {
                        file,
                        remaining: size,
                    })
                    .build()
            }
            Err(e) => filesystem_error(request, &e),
        },
    }
}

/// `/sub?x=1` becomes `/sub/?x=1`.
fn with_trailing_slash(raw_path: &str) -> String {
    match raw_path.split_once('?') {
        Some((path, query)) => format!("{path}/?{query}"),
        None => format!("{raw_path}/"),
    }
}

fn filesystem_error(request: &Request, e: &io::Error) -> Response {
    if e.kind() == io::ErrorKind::PermissionDenied {
        return Response::error(StatusCode::Forbidden, "Permission denied");
    }

    warn!(path = %request.display_path(), error = %e, "filesystem error");
    Response::error(StatusCode::InternalServerError, "Could not read the requested resource")
}
