/// 存活探针
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
