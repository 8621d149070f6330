//! Dashboard overview model.
//!
//! The CRM dashboard shows headline statistics and the latest
//! notifications. Values are display-only and serialise in camelCase for
//! both the HTML templates and the JSON endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Invoices that have been issued but not yet paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InvoicesAwaiting {
    pub current: u32,
    pub total: u32,
    pub amount: u32,
    pub percentage: u32,
}

/// Leads converted into customers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConvertedLeads {
    pub current: u32,
    pub total: u32,
    pub completed: u32,
    pub percentage: u32,
}

/// Projects currently in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectsProgress {
    pub current: u32,
    pub total: u32,
    pub percentage: u32,
}

/// Lead-to-customer conversion rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRate {
    pub rate: f64,
    pub amount: u32,
    pub percentage: u32,
}

/// Headline statistics shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub invoices_awaiting: InvoicesAwaiting,
    pub converted_leads: ConvertedLeads,
    pub projects_progress: ProjectsProgress,
    pub conversion_rate: ConversionRate,
}

/// A single entry in the notification feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: u32,
    pub user_name: String,
    /// Avatar image file name, relative to the avatar asset directory.
    pub user_avatar: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
    /// Age of the notification when the overview was produced, e.g.
    /// "2 minutes ago".
    pub time_ago: String,
}

impl Notification {
    /// Build a notification whose relative label is computed against `now`.
    pub fn new(
        id: u32,
        user_name: impl Into<String>,
        user_avatar: impl Into<String>,
        message: impl Into<String>,
        created_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_name: user_name.into(),
            user_avatar: user_avatar.into(),
            message: message.into(),
            created_at,
            time_ago: relative_label(created_at, now),
        }
    }
}

/// Everything the dashboard page needs to render.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub stats: DashboardStats,
    pub notifications: Vec<Notification>,
}

/// Format the distance between `then` and `now` as "N minutes ago".
///
/// Timestamps in the future, or less than a minute old, read as "just now".
///
/// # Examples
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use crm_backend::domain::relative_label;
///
/// let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
/// assert_eq!(relative_label(now - Duration::minutes(2), now), "2 minutes ago");
/// ```
pub fn relative_label(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);
    let (amount, unit) = if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".to_owned();
    };
    let plural = if amount == 1 { "" } else { "s" };
    format!("{amount} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    #[rstest]
    #[case(Duration::seconds(0), "just now")]
    #[case(Duration::seconds(59), "just now")]
    #[case(Duration::seconds(-30), "just now")]
    #[case(Duration::minutes(1), "1 minute ago")]
    #[case(Duration::minutes(2), "2 minutes ago")]
    #[case(Duration::minutes(53), "53 minutes ago")]
    #[case(Duration::minutes(61), "1 hour ago")]
    #[case(Duration::hours(5), "5 hours ago")]
    #[case(Duration::days(3), "3 days ago")]
    fn relative_label_picks_largest_unit(
        now: DateTime<Utc>,
        #[case] age: Duration,
        #[case] expected: &str,
    ) {
        assert_eq!(relative_label(now - age, now), expected);
    }

    #[rstest]
    fn notification_serialises_camel_case(now: DateTime<Utc>) {
        let notification =
            Notification::new(7, "Ada", "1.png", "hello", now - Duration::minutes(5), now);
        let value = serde_json::to_value(&notification).expect("serialise");
        assert_eq!(value["createdAt"], "2024-05-01T11:55:00Z");
        assert_eq!(value["timeAgo"], "5 minutes ago");
        assert_eq!(value["userName"], "Ada");
        assert_eq!(value["userAvatar"], "1.png");
    }
}
