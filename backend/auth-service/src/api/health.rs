/// GET /auth/health
pub async fn health() -> &'static str {
    "OK"
}
