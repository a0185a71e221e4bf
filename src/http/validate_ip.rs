//! `GET /validate-ip-address?ip-address=<value>`.

use axum::{
    extract::{rejection::QueryRejection, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::validation::IpShape;

/// Leftwards arrow prefixed to every answer.
pub const ARROW: char = '\u{2190}';

pub const IP_ADDRESS_PARAM: &str = "ip-address";

pub fn answer(is_valid: bool) -> String {
    format!("{ARROW} The IP address entered is valid: {is_valid}")
}

/// First `ip-address` value in the query, or empty. Later repeats are ignored.
fn first_ip_address(pairs: Vec<(String, String)>) -> String {
    pairs
        .into_iter()
        .find(|(key, _)| key == IP_ADDRESS_PARAM)
        .map(|(_, value)| value)
        .unwrap_or_default()
}

/// Always 200; an unparseable query string is treated as an empty address.
pub async fn validate_ip_address(
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Response {
    let ip_address = match query {
        Ok(Query(pairs)) => first_ip_address(pairs),
        Err(rejection) => {
            tracing::debug!(error = %rejection, "Unparseable query, treating address as empty");
            String::new()
        }
    };

    let shape = IpShape::of(&ip_address);
    tracing::debug!(
        ip_address = %ip_address,
        ipv4 = shape.ipv4,
        ipv6 = shape.ipv6,
        "Validated IP address"
    );

    (StatusCode::OK, answer(shape.is_valid())).into_response()
}
