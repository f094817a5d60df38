//! Deduplicación de notificaciones
//!
//! Antes de crear una notificación se consultan las existentes del mismo
//! usuario, tipo e id de evento (id de mantenimiento o de vehículo). Se crea
//! solo si ninguna coincidencia está sin leer, así nunca hay dos alertas sin
//! leer para el mismo evento aunque se marquen leídas en cualquier orden.

use crate::models::{NewNotification, Notification};
use crate::repositories::NotificationStore;
use crate::utils::errors::AppResult;

/// `true` si ninguna de las coincidencias existentes está sin leer
pub fn allows(existing: &[Notification]) -> bool {
    existing.iter().all(|n| n.read)
}

/// Decide si la candidata debe persistirse
pub async fn should_create(
    store: &dyn NotificationStore,
    candidate: &NewNotification,
) -> AppResult<bool> {
    let Some(event_id) = candidate.dedup_id() else {
        return Ok(true);
    };

    let existing = store
        .find_matching(
            &candidate.user_email,
            candidate.notification_type,
            candidate.notification_type.metadata_key(),
            event_id,
        )
        .await?;

    Ok(allows(&existing))
}
