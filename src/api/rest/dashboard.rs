//! Dashboard endpoints - static team status and queue metrics

use axum::{response::IntoResponse, Json};
use serde::Serialize;

use super::{avatar, ApiResponse};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: &'static str,
    pub name: &'static str,
    pub status: &'static str,
    pub current_tickets: u32,
    pub resolved_today: u32,
    pub avatar: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueMetrics {
    pub new: u32,
    pub open: u32,
    pub in_progress: u32,
    pub pending: u32,
    pub resolved: u32,
    pub overdue: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    pub team_status: Vec<TeamMember>,
    pub queue_metrics: QueueMetrics,
}

/// SLA compliance percentage per priority
#[derive(Debug, Serialize)]
pub struct SlaMetrics {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

#[derive(Debug, Serialize)]
pub struct PriorityTotal {
    pub priority: &'static str,
    pub total: u32,
}

#[derive(Debug, Serialize)]
pub struct DailyCount {
    pub date: &'static str,
    pub count: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: &'static str,
    pub user: &'static str,
    pub action: &'static str,
    pub ticket_id: &'static str,
    pub status: &'static str,
    pub timestamp: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsData {
    pub sla_metrics: SlaMetrics,
    pub metrics: Vec<PriorityTotal>,
    pub daily_trends: Vec<DailyCount>,
    pub activity_feed: Vec<Activity>,
}

fn member(
    id: &'static str,
    name: &'static str,
    status: &'static str,
    current_tickets: u32,
    resolved_today: u32,
) -> TeamMember {
    let seed = name.split_whitespace().next().unwrap_or(name);
    TeamMember {
        id,
        name,
        status,
        current_tickets,
        resolved_today,
        avatar: avatar(seed),
    }
}

/// GET /api/dashboard
pub async fn get_dashboard() -> impl IntoResponse {
    let data = DashboardData {
        team_status: vec![
            member("user-1", "Alice Johnson", "online", 5, 12),
            member("user-2", "Bob Smith", "away", 3, 8),
            member("user-3", "Carol Davis", "online", 7, 15),
        ],
        queue_metrics: QueueMetrics {
            new: 23,
            open: 45,
            in_progress: 18,
            pending: 12,
            resolved: 156,
            overdue: 3,
        },
    };

    Json(ApiResponse::new(data))
}

/// GET /api/dashboard/metrics
pub async fn get_metrics() -> impl IntoResponse {
    let metrics = [
        ("Critical", 45),
        ("High", 78),
        ("Medium", 120),
        ("Low", 89),
        ("Info", 34),
    ]
    .into_iter()
    .map(|(priority, total)| PriorityTotal { priority, total })
    .collect();

    let daily_trends = [
        ("Mon", 45),
        ("Tue", 52),
        ("Wed", 48),
        ("Thu", 61),
        ("Fri", 55),
        ("Sat", 38),
        ("Sun", 42),
    ]
    .into_iter()
    .map(|(date, count)| DailyCount { date, count })
    .collect();

    let activity_feed = vec![
        Activity {
            id: "act-1",
            user: "Alice Johnson",
            action: "resolved ticket",
            ticket_id: "#TK-1234",
            status: "resolved",
            timestamp: "2 minutes ago",
        },
        Activity {
            id: "act-2",
            user: "Bob Smith",
            action: "assigned to self",
            ticket_id: "#TK-1235",
            status: "assigned",
            timestamp: "5 minutes ago",
        },
        Activity {
            id: "act-3",
            user: "Carol Davis",
            action: "escalated ticket",
            ticket_id: "#TK-1236",
            status: "escalated",
            timestamp: "12 minutes ago",
        },
    ];

    let data = MetricsData {
        sla_metrics: SlaMetrics {
            critical: 98,
            high: 87,
            medium: 94,
            low: 99,
        },
        metrics,
        daily_trends,
        activity_feed,
    };

    Json(ApiResponse::new(data))
}
