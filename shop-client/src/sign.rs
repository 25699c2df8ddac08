//! Request signing for the marketplace Open API (HMAC-SHA256)
//!
//! Every shop-level call carries `partner_id`, `timestamp`, `access_token`,
//! `shop_id` and `sign` as query parameters. `sign` is the hex HMAC of
//! `partner_id ‖ path ‖ timestamp ‖ access_token ‖ shop_id` keyed by the
//! partner key.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::{ClientError, ClientResult};

/// Hex-encoded HMAC-SHA256 of `message` under `key`
pub fn hmac_hex(key: &str, message: &str) -> ClientResult<String> {
    let mut mac = Hmac::<Sha256>::new_from_slice(key.as_bytes())
        .map_err(|e| ClientError::Signing(e.to_string()))?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Signature base string; token and shop id are omitted for partner-level calls
pub fn base_string(
    partner_id: i64,
    path: &str,
    timestamp: i64,
    access_token: Option<&str>,
    shop_id: Option<i64>,
) -> String {
    let mut base = format!("{partner_id}{path}{timestamp}");
    if let Some(token) = access_token {
        base.push_str(token);
    }
    if let Some(shop_id) = shop_id {
        base.push_str(&shop_id.to_string());
    }
    base
}

/// Sign a shop-level API path
pub fn sign(
    partner_key: &str,
    partner_id: i64,
    path: &str,
    timestamp: i64,
    access_token: Option<&str>,
    shop_id: Option<i64>,
) -> ClientResult<String> {
    hmac_hex(
        partner_key,
        &base_string(partner_id, path, timestamp, access_token, shop_id),
    )
}
