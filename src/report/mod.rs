//! Runs a favorites query over a range of days and rolls the hits up per food.
use std::future::Future;

use chrono::NaiveDate;
use juniper::{GraphQLEnum, GraphQLObject};

use crate::parse::{FavoritesQuery, MatchResult};

/// Anything that can hand over one day's raw menu markup. A day that cannot be
/// fetched is `None`; it is never an error.
pub trait MenuSource {
    fn menu_markup(&self, date: NaiveDate) -> impl Future<Output = Option<String>> + Send;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, GraphQLEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Fetch one day at a time and stop once every food has turned up.
    #[default]
    EarlyExit,
    /// Fetch every day at once and report every day each food turns up.
    Parallel,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, GraphQLEnum, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodStatus {
    Found,
    NotFound,
}

#[derive(Debug, Clone, PartialEq, Eq, GraphQLObject, serde::Serialize, serde::Deserialize)]
pub struct DayMatches {
    pub date: NaiveDate,
    pub matches: Vec<MatchResult>,
}

#[derive(Debug, Clone, PartialEq, Eq, GraphQLObject, serde::Serialize, serde::Deserialize)]
pub struct FoodReport {
    pub food: String,
    pub status: FoodStatus,
    /// Ascending by date.
    pub days: Vec<DayMatches>,
}

impl FoodReport {
    fn new(food: &str) -> Self {
        Self {
            food: food.to_owned(),
            status: FoodStatus::NotFound,
            days: vec![],
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        self.status == FoodStatus::Found
    }

    fn record(&mut self, date: NaiveDate, matches: Vec<MatchResult>) {
        if !matches.is_empty() {
            self.days.push(DayMatches { date, matches });
            self.status = FoodStatus::Found;
        }
    }
}

pub fn date_range(start: NaiveDate, count: u32) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take(count as usize)
}

fn record_day(
    reports: &mut [FoodReport],
    query: &FavoritesQuery,
    date: NaiveDate,
    markup: &str,
    first_only: bool,
) {
    for (report, (_, matches)) in reports.iter_mut().zip(query.matches_by_food(markup)) {
        if first_only && report.is_found() {
            continue;
        }
        report.record(date, matches);
    }
}

/// One report per food, in the order the query lists them. Dates are scanned
/// in ascending order whatever order they are given in.
pub async fn scan<S>(
    source: &S,
    query: &FavoritesQuery,
    dates: impl IntoIterator<Item = NaiveDate>,
    policy: ScanPolicy,
) -> Vec<FoodReport>
where
    S: MenuSource + Sync,
{
    let mut dates: Vec<NaiveDate> = dates.into_iter().collect();
    dates.sort_unstable();
    dates.dedup();
    let mut reports: Vec<FoodReport> = query.foods().map(FoodReport::new).collect();

    match policy {
        ScanPolicy::EarlyExit => {
            for date in dates {
                if reports.iter().all(FoodReport::is_found) {
                    log::debug!("every food found, stopping before {date}");
                    break;
                }
                let Some(markup) = source.menu_markup(date).await else {
                    log::debug!("no menu for {date}, skipping");
                    continue;
                };
                record_day(&mut reports, query, date, &markup, true);
            }
        }
        ScanPolicy::Parallel => {
            let markups =
                futures::future::join_all(dates.iter().map(|&date| source.menu_markup(date)))
                    .await;
            for (date, markup) in dates.into_iter().zip(markups) {
                let Some(markup) = markup else {
                    log::debug!("no menu for {date}, skipping");
                    continue;
                };
                record_day(&mut reports, query, date, &markup, false);
            }
        }
    }
    reports
}
