use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use rocket::{
    http::{Cookie, SameSite, Status},
    request::{FromRequest, Outcome},
    time::Duration,
    Request, State,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Error;
use crate::model::{
    db::voter::Voter,
    mongodb::{Coll, Id},
};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";

/// An authentication token identifying a specific voter.
///
/// Tokens are issued by the identity collaborator that registers users;
/// this server only verifies them. The encode direction is still provided
/// for that collaborator and for tests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "sub")]
    pub id: Id,
}

impl AuthToken {
    /// Create a new [`AuthToken`] for the given voter.
    pub fn new(voter: &Voter) -> Self {
        Self { id: voter.id }
    }

    #[allow(clippy::missing_panics_doc)]
    /// Serialize this token into a cookie.
    pub fn into_cookie(self, config: &Config) -> Cookie<'static> {
        let claims = Claims {
            token: self,
            expire_at: Utc::now() + config.auth_ttl(),
        };

        let token = jsonwebtoken::encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret()),
        )
        .expect("JWT encoding is infallible with default settings");

        Cookie::build(AUTH_TOKEN_COOKIE, token)
            .max_age(Duration::seconds(config.auth_ttl().num_seconds()))
            .http_only(true)
            .same_site(SameSite::Strict)
            .finish()
    }

    /// Deserialize a token from a cookie.
    pub fn from_cookie(cookie: &Cookie<'static>, config: &Config) -> Result<Self, Error> {
        let token = jsonwebtoken::decode(
            cookie.value(),
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|claims: TokenData<Claims>| claims.claims.token)?;
        Ok(token)
    }
}

/// Cookie claims: the token itself plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    token: AuthToken,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for AuthToken {
    type Error = Error;

    /// Get an [`AuthToken`] from the cookie and verify that the voter it
    /// names still exists. Anything short of that is `Unauthenticated`.
    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        // Unwrap is safe as `Config` is always managed.
        let config = req.guard::<&State<Config>>().await.unwrap();

        let cookie = match req.cookies().get(AUTH_TOKEN_COOKIE) {
            Some(cookie) => cookie,
            None => return Outcome::Failure((Status::Unauthorized, Error::Unauthenticated)),
        };

        // Decode the token.
        let token = match Self::from_cookie(cookie, config) {
            Ok(token) => token,
            Err(_) => return Outcome::Failure((Status::Unauthorized, Error::Unauthenticated)),
        };

        // Check the voter actually exists.
        let db = req.guard::<&State<mongodb::Database>>().await.unwrap();
        let voter = Coll::<Voter>::from_db(db).find_one(token.id.as_doc(), None).await;
        match voter {
            Ok(Some(_)) => Outcome::Success(token),
            Ok(None) => Outcome::Failure((Status::Unauthorized, Error::Unauthenticated)),
            Err(e) => Outcome::Failure((Status::InternalServerError, e.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::model::db::voter::VoterCore;

    fn voter() -> Voter {
        Voter {
            id: Id::new(),
            voter: VoterCore {
                username: "turnout_enthusiast".to_string(),
            },
        }
    }

    #[test]
    fn cookie_round_trip() {
        let config = Config::example();
        let voter = voter();

        let cookie = AuthToken::new(&voter).into_cookie(&config);
        assert_eq!(cookie.name(), AUTH_TOKEN_COOKIE);

        let decoded = AuthToken::from_cookie(&cookie, &config).unwrap();
        assert_eq!(decoded.id, voter.id);
    }

    #[test]
    fn garbage_cookie_is_rejected() {
        let config = Config::example();
        let cookie = Cookie::new(AUTH_TOKEN_COOKIE, "definitely.not.ajwt");
        assert!(AuthToken::from_cookie(&cookie, &config).is_err());
    }
}
