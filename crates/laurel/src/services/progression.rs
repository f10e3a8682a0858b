//! Progression engine
//!
//! Reacts to one activity event end to end: cooldown admission, experience
//! accrual, level-up detection, best-effort notification, persistence, and
//! reward-role reconciliation.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::entities::UserProfile;
use crate::domain::errors::DomainError;
use crate::ports::gateway::{ActivityEvent, Notifier, RoleGranter};
use crate::ports::repositories::{ProfileRepository, TierRepository};
use crate::services::cooldown::CooldownTracker;

/// What `process_activity` did with an event.
#[derive(Debug)]
pub enum ActivityOutcome {
    /// The user was still on cooldown; nothing was touched.
    Throttled,
    /// Experience accrued, and possibly a level was gained.
    Accrued {
        level_up: bool,
        profile: UserProfile,
    },
}

/// Drives profile, level, and reward-role state from activity events.
pub struct ProgressionService<D> {
    store: Arc<D>,
    roles: Arc<dyn RoleGranter>,
    notifier: Arc<dyn Notifier>,
    cooldown: CooldownTracker,
}

impl<D> ProgressionService<D>
where
    D: ProfileRepository + TierRepository,
{
    pub fn new(
        store: Arc<D>,
        roles: Arc<dyn RoleGranter>,
        notifier: Arc<dyn Notifier>,
        cooldown: CooldownTracker,
    ) -> Self {
        Self {
            store,
            roles,
            notifier,
            cooldown,
        }
    }

    /// Handle one activity event.
    ///
    /// Strictly sequential: a denied cooldown admission short-circuits the
    /// whole pipeline, and the profile is saved even when no level was gained
    /// since experience changed either way.
    pub async fn process_activity(
        &self,
        event: ActivityEvent,
    ) -> Result<ActivityOutcome, DomainError> {
        if !self.cooldown.admit(event.user_id) {
            return Ok(ActivityOutcome::Throttled);
        }

        let mut profile = self
            .store
            .get_or_create_profile(event.user_id, Some(event.guild_id))
            .await?;
        profile.add_exp();

        let level_up = profile.check_level_up();
        if level_up {
            debug!(
                user_id = event.user_id,
                level = profile.progress.level,
                "Level up"
            );

            // Acknowledgements are best-effort only.
            if let Err(err) = self.notifier.level_up(event.channel_id, &profile).await {
                warn!(
                    user_id = event.user_id,
                    error = %err,
                    "Failed to deliver level-up notification"
                );
            }
        }

        self.store.save_profile(&profile).await?;
        self.reconcile_rewards(&profile).await?;

        debug!(
            user_id = event.user_id,
            experience = profile.progress.experience,
            "Experience incremented"
        );

        Ok(ActivityOutcome::Accrued { level_up, profile })
    }

    /// Grant every reached tier's reward role in one batch.
    ///
    /// A tier contributes its role only when the profile's level meets the
    /// tier minimum and the role hydrated; a tier whose role no longer exists
    /// contributes nothing. Nothing is sent when the set is empty.
    pub async fn reconcile_rewards(&self, profile: &UserProfile) -> Result<(), DomainError> {
        let tiers = self.store.list_tiers(profile.guild_id).await?;

        let roles: Vec<u64> = tiers
            .iter()
            .filter(|tier| tier.min_level <= profile.progress.level)
            .filter_map(|tier| tier.reward_role.as_ref().map(|role| role.id))
            .collect();

        if roles.is_empty() {
            return Ok(());
        }

        self.roles
            .grant(profile.guild_id, profile.user_id, &roles)
            .await
    }

    /// Directly award experience outside the activity path.
    pub async fn grant_experience(
        &self,
        user_id: u64,
        guild_id: Option<u64>,
        amount: u64,
    ) -> Result<UserProfile, DomainError> {
        let mut profile = self.store.get_or_create_profile(user_id, guild_id).await?;
        profile.add_exp_amount(amount);
        self.store.save_profile(&profile).await?;

        Ok(profile)
    }

    /// Directly remove experience, floored at zero.
    pub async fn deduct_experience(
        &self,
        user_id: u64,
        guild_id: Option<u64>,
        amount: u64,
    ) -> Result<UserProfile, DomainError> {
        let mut profile = self.store.get_or_create_profile(user_id, guild_id).await?;
        profile.deduct_exp(amount);
        self.store.save_profile(&profile).await?;

        Ok(profile)
    }
}
