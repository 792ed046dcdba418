use std::net::IpAddr;

use rocket::{
    request::{FromRequest, Outcome},
    Request,
};

/// Extract the origin address of a request: the first entry of the
/// `X-Forwarded-For` header if one is present and parses, else the peer
/// address. Either may be absent, so the result is optional.
pub fn client_ip(req: &Request<'_>) -> Option<IpAddr> {
    req.headers()
        .get_one("X-Forwarded-For")
        .and_then(|forwarded| forwarded.split(',').next())
        .and_then(|entry| entry.trim().parse().ok())
        .or_else(|| req.remote().map(|addr| addr.ip()))
}

/// Request guard form of [`client_ip`], for recording on votes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<IpAddr>);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for ClientIp {
    type Error = (); // No errors possible, use the `!` type once stabilised.

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(ClientIp(client_ip(req)))
    }
}

#[cfg(test)]
mod tests {
    use rocket::{http::Header, local::blocking::Client};

    use super::*;

    #[get("/ip")]
    fn ip(client_ip: ClientIp) -> String {
        match client_ip.0 {
            Some(ip) => ip.to_string(),
            None => "none".to_string(),
        }
    }

    fn client() -> Client {
        Client::tracked(rocket::build().mount("/", routes![ip])).unwrap()
    }

    #[test]
    fn forwarded_header_takes_first_entry() {
        let client = client();
        let response = client
            .get("/ip")
            .header(Header::new("X-Forwarded-For", "203.0.113.7, 70.41.3.18"))
            .dispatch();
        assert_eq!(response.into_string().unwrap(), "203.0.113.7");
    }

    #[test]
    fn single_forwarded_entry_is_trimmed() {
        let client = client();
        let response = client
            .get("/ip")
            .header(Header::new("X-Forwarded-For", " 2001:db8::17 "))
            .dispatch();
        assert_eq!(response.into_string().unwrap(), "2001:db8::17");
    }

    #[test]
    fn absent_header_and_peer_yields_none() {
        // Locally dispatched requests have no peer address either.
        let client = client();
        let response = client.get("/ip").dispatch();
        assert_eq!(response.into_string().unwrap(), "none");
    }

    #[test]
    fn unparseable_header_is_ignored() {
        let client = client();
        let response = client
            .get("/ip")
            .header(Header::new("X-Forwarded-For", "not-an-address"))
            .dispatch();
        assert_eq!(response.into_string().unwrap(), "none");
    }
}
