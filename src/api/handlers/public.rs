/*
 * Responsibility
 * - The gateway's own pages: one public, two behind the access middleware
 */

pub async fn index() -> &'static str {
    "This is public. try to access /secret or /topsecret"
}

pub async fn secret() -> &'static str {
    "This is secret! Noice!"
}

pub async fn topsecret() -> &'static str {
    "This is top secret! Awesome!"
}
