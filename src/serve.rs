//! HTTP server for interactive mode
//!
//! `tunescope serve` → starts server, opens browser, shows the dashboard.
//! Every request regenerates the dataset; the server keeps no state
//! beyond the configured [`Dashboard`].

use crate::dashboard::{Dashboard, DashboardParams, DashboardReport, DashboardRequest};
use crate::error::{Error, Result};
use crate::generator::Variant;
use crate::report::{csv, html};
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, Server};
use tracing::{info, warn};

#[derive(Serialize)]
struct ApiResponse<T> {
    ok: bool,
    data: Option<T>,
    error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: T) -> Self {
        Self { ok: true, data: Some(data), error: None }
    }
}

impl ApiResponse<()> {
    fn failure(error: &Error) -> Self {
        Self { ok: false, data: None, error: Some(error.to_string()) }
    }
}

/// Server settings
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub port: u16,
    /// Variant used when a request does not name one
    pub variant: Variant,
    pub open_browser: bool,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self { port: 3001, variant: Variant::Charts, open_browser: true }
    }
}

/// Start server, open browser, serve dashboard
pub fn start(config: ServeConfig, dashboard: Dashboard) -> Result<()> {
    let addr = format!("127.0.0.1:{}", config.port);
    let server = Server::http(&addr).map_err(|e| Error::Server(e.to_string()))?;

    let url = format!("http://localhost:{}", config.port);

    eprintln!("\n\x1b[1;32m♫ Tunescope\x1b[0m");
    eprintln!("   {}", url);
    eprintln!("   Default dataset: {}\n", config.variant);
    info!(%addr, variant = %config.variant, "dashboard server listening");

    if config.open_browser {
        let _ = open::that(&url);
    }

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, &dashboard, config.variant) {
            warn!(error = %e, "failed to answer request");
        }
    }

    Ok(())
}

fn content_type(value: &'static str) -> Header {
    // static ASCII header, cannot fail
    Header::from_bytes(&b"Content-Type"[..], value.as_bytes()).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    /// Rendered dashboard page
    Page,
    /// Full report as JSON
    Api,
    /// Filtered tracks as CSV
    Csv,
    NotFound,
}

fn route(method: &Method, path: &str) -> Route {
    match (method, path) {
        (&Method::Get, "/") | (&Method::Get, "/report") => Route::Page,
        (&Method::Get, "/api/dashboard") => Route::Api,
        (&Method::Get, "/api/tracks.csv") => Route::Csv,
        _ => Route::NotFound,
    }
}

fn handle_request(request: Request, dashboard: &Dashboard, default_variant: Variant) -> std::io::Result<()> {
    let url = request.url().to_string();
    let mut parts = url.splitn(2, '?');
    let path = parts.next().unwrap_or("/").to_string();
    let query = parts.next().unwrap_or("");
    let method = request.method().clone();

    info!(%method, %url, "→");

    match route(&method, &path) {
        Route::Page => {
            let (status, body) = page(dashboard, query, default_variant)?;
            request.respond(
                Response::from_data(body)
                    .with_status_code(status)
                    .with_header(content_type("text/html; charset=utf-8")),
            )
        }

        Route::Api => {
            let (status, json) = match run(dashboard, query, default_variant) {
                Ok(report) => (200, serde_json::to_string(&ApiResponse::success(report))?),
                Err(e) => (
                    if e.is_client_error() { 400 } else { 500 },
                    serde_json::to_string(&ApiResponse::<()>::failure(&e))?,
                ),
            };
            request.respond(
                Response::from_string(json)
                    .with_status_code(status)
                    .with_header(content_type("application/json")),
            )
        }

        Route::Csv => match run(dashboard, query, default_variant) {
            Ok(report) => {
                let mut body = Vec::new();
                csv::write(&mut body, &report.tracks, report.variant)?;
                request.respond(Response::from_data(body).with_header(content_type("text/csv")))
            }
            Err(e) => request.respond(
                Response::from_string(e.to_string()).with_status_code(if e.is_client_error() { 400 } else { 500 }),
            ),
        },

        Route::NotFound => {
            let response = Response::from_string("Not found").with_status_code(404);
            request.respond(response)
        }
    }
}

/// Rendered dashboard page, or an error page with 400/500
fn page(dashboard: &Dashboard, query: &str, default_variant: Variant) -> std::io::Result<(u16, Vec<u8>)> {
    match run(dashboard, query, default_variant) {
        Ok(report) => {
            let mut body = Vec::new();
            html::write(&mut body, &report)?;
            Ok((200, body))
        }
        Err(e) => {
            let status = if e.is_client_error() { 400 } else { 500 };
            let body = format!(
                "<h1>Bad request</h1><p>{}</p><p><a href=\"/\">Reset filters</a></p>",
                html::html_escape(&e.to_string())
            );
            Ok((status, body.into_bytes()))
        }
    }
}

/// Parse the query, fill in the default variant, build a fresh report
fn run(dashboard: &Dashboard, query: &str, default_variant: Variant) -> Result<DashboardReport> {
    let mut params = DashboardParams::from_query(query)?;
    if params.variant.is_none() {
        params.variant = Some(default_variant.to_string());
    }
    let request = DashboardRequest::try_from(params)?;
    dashboard.run(&request)
}
