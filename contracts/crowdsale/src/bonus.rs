use crate::errors::Error;
use crate::types::BonusTier;
use soroban_sdk::{Env, Vec};

/// Zips the two parallel arrays into tier records.
pub fn build_schedule(
    env: &Env,
    timestamps: &Vec<u64>,
    percentages: &Vec<u32>,
) -> Result<Vec<BonusTier>, Error> {
    if timestamps.len() != percentages.len() {
        return Err(Error::BonusScheduleMismatch);
    }
    let mut tiers = Vec::new(env);
    for (threshold, percentage) in timestamps.iter().zip(percentages.iter()) {
        if threshold == 0 {
            return Err(Error::InvalidBonusThreshold);
        }
        tiers.push_back(BonusTier {
            threshold,
            percentage,
        });
    }
    Ok(tiers)
}

/// Percentage of the first stored tier whose threshold has not passed yet.
///
/// Tiers are scanned in stored order, not sorted. With ascending thresholds the rate
/// steps up toward each successive threshold and drops to zero after the last one.
pub fn percentage_at(tiers: &Vec<BonusTier>, now: u64) -> u32 {
    tiers
        .iter()
        .find(|tier| tier.threshold >= now)
        .map(|tier| tier.percentage)
        .unwrap_or(0)
}

pub fn calculate_bonus(amount: i128, percentage: u32) -> Result<i128, Error> {
    amount
        .checked_mul(percentage as i128)
        .map(|scaled| scaled / 100)
        .ok_or(Error::ArithmeticOverflow)
}
