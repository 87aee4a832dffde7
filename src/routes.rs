// src/routes.rs
// Route table: maps URL patterns to mounted files and directories

use crate::error::ServeError;
use crate::mount::{Mount, MountKind};
use crate::shutdown::{ShutdownReason, ShutdownTrigger};
use actix_files::{Files, NamedFile};
use actix_web::{http::header::ContentType, web, HttpRequest, HttpResponse};
use std::cmp::Reverse;
use std::path::PathBuf;

pub const SHUTDOWN_PATTERN: &str = "/end";
pub const SHUTDOWN_MESSAGE: &str = "Stopping the Server!";

#[derive(Debug, Default)]
pub struct RouteTable {
    routes: Vec<Mount>,
    shutdown: Option<String>,
}

impl RouteTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve `/end` for the shutdown route.
    pub fn with_shutdown_endpoint(mut self) -> Self {
        self.shutdown = Some(SHUTDOWN_PATTERN.to_string());
        self
    }

    pub fn has_shutdown_endpoint(&self) -> bool {
        self.shutdown.is_some()
    }

    pub fn routes(&self) -> &[Mount] {
        &self.routes
    }

    pub fn register(&mut self, mount: Mount) -> Result<(), ServeError> {
        validate_pattern(&mount)?;

        let taken = self.shutdown.as_deref() == Some(mount.pattern.as_str())
            || self.routes.iter().any(|route| route.pattern == mount.pattern);
        if taken {
            return Err(ServeError::DuplicatePattern(mount.pattern));
        }

        log::info!("Mounted {} at {}", mount.target.display(), mount.pattern);
        self.routes.push(mount);
        Ok(())
    }

    /// Install every route into an actix-web app.
    ///
    /// The first matching service wins in actix. The shutdown route goes
    /// first, then exact file patterns, then prefix patterns longest first.
    /// `Files` also answers its mount path without the trailing slash, so
    /// `/docs` must be registered ahead of `/docs/`.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        if let Some(ref pattern) = self.shutdown {
            cfg.service(web::resource(pattern.as_str()).to(stop_server));
        }

        for mount in self.ordered() {
            match mount.kind {
                MountKind::File => {
                    let path = if mount.pattern.ends_with('/') {
                        format!("{}{{tail:.*}}", mount.pattern)
                    } else {
                        mount.pattern.clone()
                    };
                    let file = mount.target.clone();

                    cfg.service(
                        web::resource(path)
                            .to(move |req: HttpRequest| serve_file(req, file.clone())),
                    );
                }
                MountKind::Directory => {
                    cfg.service(
                        Files::new(&mount.pattern, &mount.target)
                            .index_file("index.html")
                            .show_files_listing()
                            .use_hidden_files()
                            .redirect_to_slash_directory(),
                    );
                }
            }
        }
    }

    /// Registration order: exact patterns before prefix patterns, and
    /// prefixes from most to least specific.
    fn ordered(&self) -> Vec<&Mount> {
        let mut ordered: Vec<&Mount> = self.routes.iter().collect();
        ordered.sort_by_key(|mount| (mount.is_prefix(), Reverse(mount.pattern.len())));
        ordered
    }
}

fn validate_pattern(mount: &Mount) -> Result<(), ServeError> {
    let pattern = mount.pattern.as_str();
    let valid = pattern.starts_with('/')
        && !pattern.contains(|c: char| c == '{' || c == '}')
        && (mount.kind == MountKind::File || pattern.ends_with('/'));

    if valid {
        Ok(())
    } else {
        Err(ServeError::InvalidPattern(pattern.to_string()))
    }
}

async fn serve_file(req: HttpRequest, file: PathBuf) -> actix_web::Result<HttpResponse> {
    let named = NamedFile::open_async(&file).await?;
    Ok(named.into_response(&req))
}

async fn stop_server(trigger: web::Data<ShutdownTrigger>) -> HttpResponse {
    if !trigger.trigger(ShutdownReason::Endpoint) {
        log::debug!("Shutdown already pending");
    }

    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(SHUTDOWN_MESSAGE)
}
