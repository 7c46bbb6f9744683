use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored meal. `id` and `created_at` are always assigned by the database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Meal {
    pub id: i32,
    pub name: String,
    pub calories: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreateMealParams {
    pub name: String,
    pub calories: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_meal_serializes_with_snake_case_fields() {
        let meal = Meal {
            id: 7,
            name: "Oatmeal".to_string(),
            calories: 300,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 8, 30, 0).unwrap(),
        };

        let json = serde_json::to_value(&meal).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["name"], "Oatmeal");
        assert_eq!(json["calories"], 300);
        assert_eq!(json["created_at"], "2024-03-01T08:30:00Z");
    }
}
