use std::net::{IpAddr, Ipv4Addr};

use axum::http::HeaderMap;

/// Best-effort client address for request logging.
///
/// Priority:
/// 1. X-Forwarded-For (first entry in the chain)
/// 2. X-Real-IP
/// 3. Socket peer address
/// 4. `"unknown"`
///
/// IPv6 loopback is reported as `127.0.0.1`. Forwarding headers are client
/// controlled, so the result must never feed an authorization decision.
pub fn extract_client_ip(headers: &HeaderMap, peer: Option<IpAddr>) -> String {
    if let Some(forwarded_for) = headers.get("x-forwarded-for")
        && let Ok(forwarded_str) = forwarded_for.to_str()
    {
        // "client, proxy1, proxy2"
        let first = forwarded_str.split(',').next().unwrap_or("").trim();
        if !first.is_empty() {
            return normalize(first);
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip")
        && let Ok(real_ip_str) = real_ip.to_str()
    {
        let real_ip_str = real_ip_str.trim();
        if !real_ip_str.is_empty() {
            return normalize(real_ip_str);
        }
    }

    match peer {
        Some(ip) => normalize_ip(ip),
        None => "unknown".to_string(),
    }
}

/// Parseable addresses are normalized; anything else is passed through as sent.
fn normalize(raw: &str) -> String {
    let unbracketed = raw.trim_start_matches('[').trim_end_matches(']');
    match unbracketed.parse::<IpAddr>() {
        Ok(ip) => normalize_ip(ip),
        Err(_) => raw.to_string(),
    }
}

fn normalize_ip(ip: IpAddr) -> String {
    if ip.is_loopback() && ip.is_ipv6() {
        return Ipv4Addr::LOCALHOST.to_string();
    }
    ip.to_string()
}
