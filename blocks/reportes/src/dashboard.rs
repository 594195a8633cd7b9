use aws_sdk_dynamodb::Client as DynamoClient;
use lambda_http::{http::StatusCode, Body, Error, Response};
use std::collections::HashMap;

use salvay_atoms::capacitaciones::service as capacitaciones_service;
use salvay_atoms::recesos::model::Receso;
use salvay_atoms::recesos::service as recesos_service;
use salvay_atoms::recesos::validate::calendar_days_between;
use salvay_atoms::users::model::User;
use salvay_atoms::users::service as users_service;

use crate::types::{DashboardStats, UserLeaveDays};

/// Sum inclusive calendar days per user. Users without requests still get
/// a zero row so the chart shows the whole team.
pub fn leave_days_by_user(recesos: &[Receso], users: &[User]) -> Vec<UserLeaveDays> {
    let mut per_user: HashMap<&str, (usize, i64)> = HashMap::new();
    for receso in recesos {
        let entry = per_user.entry(receso.user_id.as_str()).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += calendar_days_between(receso.start_date, receso.end_date);
    }

    let mut rows: Vec<UserLeaveDays> = users
        .iter()
        .map(|user| {
            let (total_recesos, total_dias) = per_user
                .get(user.user_id.as_str())
                .copied()
                .unwrap_or((0, 0));
            UserLeaveDays {
                user_id: user.user_id.clone(),
                user_name: user.user_name.clone(),
                total_recesos,
                total_dias,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.total_dias.cmp(&a.total_dias));
    rows
}

/// GET /dashboard - admin landing page aggregates.
pub async fn dashboard_stats(
    client: &DynamoClient,
    table_name: &str,
) -> Result<Response<Body>, Error> {
    let (recesos_result, users_result, capacitaciones_result) = tokio::join!(
        recesos_service::list_recesos(client, table_name),
        users_service::list_users(client, table_name),
        capacitaciones_service::list_capacitaciones(client, table_name, None)
    );

    let recesos = recesos_result.map_err(|e| Error::from(e.to_string()))?;
    let users = users_result.map_err(|e| Error::from(e.to_string()))?;
    let capacitaciones = capacitaciones_result.map_err(|e| Error::from(e.to_string()))?;

    let stats = DashboardStats {
        total_usuarios: users.len(),
        total_recesos: recesos.len(),
        total_capacitaciones: capacitaciones.len(),
        dias_por_usuario: leave_days_by_user(&recesos, &users),
    };

    Ok(Response::builder()
        .status(StatusCode::OK)
        .header("Content-Type", "application/json")
        .body(serde_json::to_string(&stats)?.into())
        .map_err(Box::new)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use salvay_atoms::users::model::Role;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn user(id: &str, name: &str) -> User {
        User {
            user_id: id.to_string(),
            user_name: name.to_string(),
            user_type: Role::Bioquimica,
            created_at: String::new(),
        }
    }

    fn receso(owner: &str, start: NaiveDate, end: NaiveDate) -> Receso {
        Receso {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: owner.to_string(),
            start_date: start,
            end_date: end,
            comments: None,
            created_date: String::new(),
            user: None,
        }
    }

    #[test]
    fn sums_inclusive_calendar_days_per_user() {
        let users = vec![user("u1", "ana"), user("u2", "bruno")];
        let recesos = vec![
            // Mon-Thu: 4 calendar days.
            receso("u1", d(2024, 6, 3), d(2024, 6, 6)),
            // Single day.
            receso("u1", d(2024, 7, 1), d(2024, 7, 1)),
            receso("u2", d(2024, 6, 10), d(2024, 6, 11)),
        ];

        let rows = leave_days_by_user(&recesos, &users);
        let ana = rows.iter().find(|r| r.user_id == "u1").unwrap();
        assert_eq!(ana.total_recesos, 2);
        assert_eq!(ana.total_dias, 5);
        let bruno = rows.iter().find(|r| r.user_id == "u2").unwrap();
        assert_eq!(bruno.total_dias, 2);
    }

    #[test]
    fn users_without_requests_get_zero_rows() {
        let users = vec![user("u1", "ana"), user("u3", "carla")];
        let recesos = vec![receso("u1", d(2024, 6, 3), d(2024, 6, 4))];

        let rows = leave_days_by_user(&recesos, &users);
        assert_eq!(rows.len(), 2);
        let carla = rows.iter().find(|r| r.user_id == "u3").unwrap();
        assert_eq!(carla.total_recesos, 0);
        assert_eq!(carla.total_dias, 0);
    }

    #[test]
    fn rows_sorted_by_days_descending() {
        let users = vec![user("u1", "ana"), user("u2", "bruno")];
        let recesos = vec![
            receso("u1", d(2024, 6, 3), d(2024, 6, 3)),
            receso("u2", d(2024, 6, 3), d(2024, 6, 7)),
        ];
        let rows = leave_days_by_user(&recesos, &users);
        assert_eq!(rows[0].user_id, "u2");
    }
}
