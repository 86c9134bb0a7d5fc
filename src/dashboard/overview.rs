use chrono::{DateTime, Utc};
use futures::future::try_join;
use serde::Serialize;
use tracing::debug;

use crate::gateway::{GatewayError, RecordGateway};
use crate::models::{Organization, Person};

/// How many recent additions the overview lists per collection
pub const RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_organizations: usize,
    pub total_people: usize,
    pub recent_organizations: Vec<String>,
    pub recent_people: Vec<String>,
}

impl Overview {
    /// Fetch both collections concurrently and summarize them.
    pub async fn load<G>(gateway: &G) -> Result<Self, GatewayError>
    where
        G: RecordGateway<Organization> + RecordGateway<Person> + ?Sized,
    {
        let (organizations, people) = try_join(
            RecordGateway::<Organization>::list(gateway),
            RecordGateway::<Person>::list(gateway),
        )
        .await?;
        debug!(organizations = organizations.len(), people = people.len(), "overview loaded");

        Ok(Self::summarize(&organizations, &people))
    }

    pub fn summarize(organizations: &[Organization], people: &[Person]) -> Self {
        Self {
            total_organizations: organizations.len(),
            total_people: people.len(),
            recent_organizations: newest(organizations, |o| o.created_at, |o| o.name.clone()),
            recent_people: newest(people, |p| p.created_at, Person::full_name),
        }
    }
}

/// Labels of the most recently created records, newest first. Records with
/// no timestamp are left out.
fn newest<R>(
    records: &[R],
    created_at: impl Fn(&R) -> Option<DateTime<Utc>>,
    label: impl Fn(&R) -> String,
) -> Vec<String> {
    let mut dated: Vec<(DateTime<Utc>, &R)> = records
        .iter()
        .filter_map(|r| created_at(r).map(|at| (at, r)))
        .collect();
    dated.sort_by(|a, b| b.0.cmp(&a.0));
    dated.into_iter().take(RECENT_LIMIT).map(|(_, r)| label(r)).collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::dashboard::fake::organization;

    #[test]
    fn summarize_counts_and_orders_recent() {
        let mut older = organization("1", "Older");
        older.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single();
        let mut newer = organization("2", "Newer");
        newer.created_at = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).single();
        let undated = organization("3", "Undated");

        let overview = Overview::summarize(&[older, undated, newer], &[]);
        assert_eq!(overview.total_organizations, 3);
        assert_eq!(overview.total_people, 0);
        assert_eq!(overview.recent_organizations, vec!["Newer", "Older"]);
    }
}
