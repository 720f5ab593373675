mod date_stamp;

use std::{fmt, time::Duration};

use chrono::NaiveDate;
use governor::{
    clock::{QuantaClock, QuantaInstant},
    middleware::NoOpMiddleware,
    state::{InMemoryState, NotKeyed},
    Jitter, Quota, RateLimiter,
};
use reqwest::{Client, Error as RequestError};
use tracing::{instrument, Level};
use url::Url;

pub use date_stamp::{DateStamp, InvalidDateStamp};

use crate::{config::Config, report::MenuSource};

pub fn make_client() -> reqwest::Client {
    Client::builder()
        .gzip(true)
        .timeout(Duration::from_secs(20))
        .build()
        .expect("client creation should succeed")
}

static DELAY_JITTER: Duration = Duration::from_millis(500);

type Limiter = RateLimiter<NotKeyed, InMemoryState, QuantaClock, NoOpMiddleware<QuantaInstant>>;

/// The dining site's menu endpoint.
pub struct Upstream {
    client: Client,
    url: Url,
    action: String,
    rate_limiter: Limiter,
}

impl fmt::Debug for Upstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Upstream")
            .field("url", &self.url.as_str())
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl Upstream {
    pub fn new(client: Client, config: &Config) -> Self {
        Self {
            client,
            url: config.menu_url.clone(),
            action: config.menu_action.clone(),
            rate_limiter: RateLimiter::direct(Quota::per_second(config.rate_limit)),
        }
    }

    /// Raw menu markup for one day. Non-success statuses are errors.
    #[instrument(skip_all, fields(date = %date), level = Level::TRACE)]
    pub async fn fetch_markup(&self, date: DateStamp) -> Result<String, RequestError> {
        let jitter = Jitter::new(Duration::ZERO, DELAY_JITTER);
        self.rate_limiter.until_ready_with_jitter(jitter).await;
        let date = date.to_string();
        let form = [
            ("action", self.action.as_str()),
            ("date", date.as_str()),
            ("location", ""),
            ("mealperiod", ""),
        ];
        let start = std::time::Instant::now();
        let res = self
            .client
            .post(self.url.clone())
            .form(&form)
            .send()
            .await?
            .error_for_status()?;
        let text = res.text().await?;
        log::trace!("Got menu markup for {date} in \t {:?}", start.elapsed());
        Ok(text)
    }
}

impl MenuSource for Upstream {
    async fn menu_markup(&self, date: NaiveDate) -> Option<String> {
        match self.fetch_markup(date.into()).await {
            Ok(markup) => Some(markup),
            Err(e) => {
                log::warn!("Error fetching menu for {date}: {e}");
                None
            }
        }
    }
}
