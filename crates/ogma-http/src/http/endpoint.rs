//! Protocol endpoint resolution
//!
//! The wire protocol exposes three endpoints derived from the configured
//! server base: the begin-transaction endpoint, the auto-commit endpoint,
//! and per-transaction URLs. The first two are computed here; a transaction's
//! own URL is only ever the `Location` value assigned by the server at begin
//! time and is never constructed client-side.

/// Fixed path of the transaction endpoint below the server base
const TRANSACTION_PATH: &str = "db/data/transaction";

/// The begin-transaction endpoint for a server base URL
///
/// Exactly one path separator is inserted between the base and the fixed
/// suffix, whether or not the base already ends with one.
pub fn transaction_endpoint(server: &str) -> String {
    let mut url = String::from(server);
    if !url.ends_with('/') {
        url.push('/');
    }
    url.push_str(TRANSACTION_PATH);
    url
}

/// The auto-commit endpoint, where each request is its own implicit transaction
pub fn auto_commit_url(server: &str) -> String {
    let mut url = transaction_endpoint(server);
    url.push_str("/commit");
    url
}
