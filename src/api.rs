use std::sync::Arc;

use axum::{extract::State, Json};
use chrono::NaiveDate;
use juniper::{graphql_object, FieldResult};

use crate::{
    config::Config,
    error::{Error, Result},
    fetch::{make_client, DateStamp, Upstream},
    parse::{self, extract_full_menu, FavoritesQuery, LocationMenu},
    report::{self, FoodReport, ScanPolicy},
};

#[derive(Debug)]
pub struct App {
    upstream: Upstream,
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            upstream: Upstream::new(make_client(), &config),
            config,
        }
    }

    pub async fn favorites(&self, req: FavoritesRequest) -> Result<Vec<FoodReport>> {
        let query = FavoritesQuery::new(req.foods, req.locations, self.config.noise_filter)?;
        let days = req.days.unwrap_or(self.config.scan_days);
        if days > self.config.max_scan_days {
            return Err(parse::Error::TooManyDays {
                requested: days,
                max: self.config.max_scan_days,
            }
            .into());
        }
        let policy = req.policy.unwrap_or_default();
        log::info!(
            "Scanning {days} days from {} for {} foods ({policy:?})",
            req.start,
            query.foods().len()
        );
        let dates = report::date_range(req.start, days);
        Ok(report::scan(&self.upstream, &query, dates, policy).await)
    }

    pub async fn full_menu(&self, location: &str, date: NaiveDate) -> Result<Option<LocationMenu>> {
        let markup = self.upstream.fetch_markup(date.into()).await?;
        Ok(extract_full_menu(&markup, location, self.config.noise_filter))
    }
}

#[derive(Debug, serde::Deserialize)]
pub struct MenuRequest {
    date: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
pub struct FavoritesRequest {
    #[serde(default)]
    foods: Vec<String>,
    #[serde(default)]
    locations: Vec<String>,
    start: NaiveDate,
    days: Option<u32>,
    policy: Option<ScanPolicy>,
}

/// Passes the provider's markup for one day straight through. A missing or
/// unreadable body is the same as a missing date.
pub async fn menu(
    State(app): State<Arc<App>>,
    req: Option<Json<MenuRequest>>,
) -> Result<String> {
    let date = req.and_then(|Json(req)| req.date);
    let date: DateStamp = date.as_deref().ok_or(Error::MissingDate)?.parse()?;
    Ok(app.upstream.fetch_markup(date).await?)
}

pub async fn favorites(
    State(app): State<Arc<App>>,
    Json(req): Json<FavoritesRequest>,
) -> Result<Json<Vec<FoodReport>>> {
    app.favorites(req).await.map(Json)
}

#[derive(Clone, Debug)]
pub struct Query(pub Arc<App>);

#[graphql_object]
impl Query {
    /// Looks for each favorite food at the given dining locations, day by day
    /// from `start`.
    async fn favorites(
        &self,
        foods: Vec<String>,
        locations: Vec<String>,
        start: NaiveDate,
        days: Option<i32>,
        policy: Option<ScanPolicy>,
    ) -> FieldResult<Vec<FoodReport>> {
        let days = days
            .map(u32::try_from)
            .transpose()
            .map_err(|_| "days must not be negative")?;
        let req = FavoritesRequest {
            foods,
            locations,
            start,
            days,
            policy,
        };
        Ok(self.0.favorites(req).await?)
    }

    /// Everything one location serves on `date`, or null if it is closed.
    async fn full_menu(&self, location: String, date: NaiveDate) -> FieldResult<Option<LocationMenu>> {
        Ok(self.0.full_menu(&location, date).await?)
    }
}
