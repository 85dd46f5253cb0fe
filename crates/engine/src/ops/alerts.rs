use chrono::Utc;
use sea_orm::{QueryFilter, QueryOrder, prelude::*};
use uuid::Uuid;

use crate::{Alert, Collection, ResultEngine, alerts};

use super::{Engine, patch_value};

impl Engine {
    /// Alerts of `user_id`, newest first.
    pub async fn list_alerts(&self, user_id: &str) -> ResultEngine<Vec<Alert>> {
        let models = alerts::Entity::find()
            .filter(alerts::Column::UserId.eq(user_id))
            .order_by_desc(alerts::Column::Timestamp)
            .order_by_asc(alerts::Column::Id)
            .all(&self.database)
            .await?;
        models.into_iter().map(Alert::try_from).collect()
    }

    pub async fn mark_alert_read(&self, user_id: &str, alert_id: Uuid) -> ResultEngine<()> {
        let changes = alerts::ActiveModel {
            read: patch_value(Some(true)),
            updated_at: patch_value(Some(Utc::now())),
            ..Default::default()
        };
        alerts::Entity::update_many()
            .set(changes)
            .filter(alerts::Column::Id.eq(alert_id.to_string()))
            .filter(alerts::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        self.notify(user_id, &[Collection::Alerts]);
        Ok(())
    }

    pub async fn clear_alert(&self, user_id: &str, alert_id: Uuid) -> ResultEngine<()> {
        alerts::Entity::delete_many()
            .filter(alerts::Column::Id.eq(alert_id.to_string()))
            .filter(alerts::Column::UserId.eq(user_id))
            .exec(&self.database)
            .await?;

        self.notify(user_id, &[Collection::Alerts]);
        Ok(())
    }
}
