use crate::models::Response;

/// Page served in place of a top-level navigation the network could not
/// complete.
pub const OFFLINE_PAGE_HTML: &str = concat!(
    "<!DOCTYPE html><html><head><title>PickMe - Hors ligne</title>",
    "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\"></head>",
    "<body style=\"font-family: Arial, sans-serif; text-align: center; padding: 50px; ",
    "background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); color: white; ",
    "min-height: 100vh; display: flex; align-items: center; justify-content: center; margin: 0;\">",
    "<div><h1>🎬 PickMe</h1><p>Vous êtes hors ligne</p>",
    "<p>Vérifiez votre connexion internet et réessayez</p></div></body></html>",
);

pub fn offline_page() -> Response {
    Response::html(OFFLINE_PAGE_HTML)
}
