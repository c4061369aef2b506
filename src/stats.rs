//! Player stat model and derivation.
//!
//! Base stats persist across frames; everything the combat code reads comes
//! from [`derive_stats`], which recomputes an effective snapshot from the base
//! block plus every equipped bonus. Health is the only stat that mutates
//! across frames, and the only path that mutates it is the damage parameter
//! of [`derive_stats`].

use crate::inventory::Equipment;

/// Every stat the game tracks. Items and wildboys grant deltas per kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(usize)]
pub enum StatKind {
    Health,
    MaxHealth,
    Armor,
    AttackDamage,
    /// Attacks per second
    AttackSpeed,
    /// Sword reach away from the player
    AttackLength,
    /// Sword span across the swing
    AttackWidth,
    MovementSpeed,
    DashDistance,
    /// Seconds between dashes
    DashCooldown,
}

impl StatKind {
    pub const COUNT: usize = 10;

    pub const ALL: [StatKind; Self::COUNT] = [
        StatKind::Health,
        StatKind::MaxHealth,
        StatKind::Armor,
        StatKind::AttackDamage,
        StatKind::AttackSpeed,
        StatKind::AttackLength,
        StatKind::AttackWidth,
        StatKind::MovementSpeed,
        StatKind::DashDistance,
        StatKind::DashCooldown,
    ];

    /// Display label used by the stats panel and item tooltips.
    pub fn label(&self) -> &'static str {
        match self {
            StatKind::Health => "Health",
            StatKind::MaxHealth => "MaxHealth",
            StatKind::Armor => "Armor",
            StatKind::AttackDamage => "AttackDamage",
            StatKind::AttackSpeed => "AttackSpeed",
            StatKind::AttackLength => "AttackLength",
            StatKind::AttackWidth => "AttackWidth",
            StatKind::MovementSpeed => "MovementSpeed",
            StatKind::DashDistance => "DashDistance",
            StatKind::DashCooldown => "DashCooldown",
        }
    }
}

/// A fixed-size table of stat values indexed by [`StatKind`].
///
/// Used both for the player's persistent base stats and for the per-item
/// bonus deltas, so adding a bonus is a plain element-wise add.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct StatBlock([f32; StatKind::COUNT]);

impl StatBlock {
    /// All-zero block, the starting point for item bonuses.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The player's default base stats.
    pub fn player_defaults() -> Self {
        let mut block = Self::zero();
        block.set(StatKind::Health, 100.0);
        block.set(StatKind::MaxHealth, 100.0);
        block.set(StatKind::Armor, 0.0);
        block.set(StatKind::AttackDamage, 10.0);
        block.set(StatKind::AttackSpeed, 2.0);
        block.set(StatKind::AttackLength, 0.0);
        block.set(StatKind::AttackWidth, 0.0);
        block.set(StatKind::MovementSpeed, 2.0);
        block.set(StatKind::DashDistance, 250.0);
        block.set(StatKind::DashCooldown, 1.0);
        block
    }

    pub fn get(&self, kind: StatKind) -> f32 {
        self.0[kind as usize]
    }

    pub fn set(&mut self, kind: StatKind, value: f32) {
        self.0[kind as usize] = value;
    }

    pub fn add(&mut self, kind: StatKind, delta: f32) {
        self.0[kind as usize] += delta;
    }

    /// Element-wise add of a whole bonus block.
    pub fn add_all(&mut self, bonuses: &StatBlock) {
        for kind in StatKind::ALL {
            self.add(kind, bonuses.get(kind));
        }
    }

    /// Health as a fraction of MaxHealth, clamped to [0, 1] for the HUD bar.
    pub fn health_fraction(&self) -> f32 {
        let max = self.get(StatKind::MaxHealth);
        if max > 0.0 {
            (self.get(StatKind::Health) / max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Iterate over every entry in display order.
    pub fn entries(&self) -> impl Iterator<Item = (StatKind, f32)> + '_ {
        StatKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.get(kind)))
    }
}

/// Derive the effective stat snapshot and optionally apply incoming damage.
///
/// Bonuses stack in a fixed order: equipped weapon, equipped armor (armor's
/// Health bonus raises MaxHealth instead of current Health), then every
/// wildboy unconditionally. When `pending_damage > 0` the armor-mitigated
/// damage (never below 1) is subtracted from Health and written back into
/// `base` - the sole mutation path for Health. The final Health value is
/// clamped to `[0, MaxHealth]` and the clamp is synced back, so a zero-damage
/// call is a pure read.
pub fn derive_stats(base: &mut StatBlock, equipment: &Equipment, pending_damage: f32) -> StatBlock {
    let mut derived = *base;

    if let Some(weapon) = &equipment.weapon {
        derived.add_all(&weapon.bonuses);
    }

    if let Some(armor) = &equipment.armor {
        for kind in StatKind::ALL {
            let bonus = armor.bonuses.get(kind);
            match kind {
                StatKind::Health => derived.add(StatKind::MaxHealth, bonus),
                _ => derived.add(kind, bonus),
            }
        }
    }

    for wildboy in &equipment.wildboys {
        derived.add_all(&wildboy.bonuses);
    }

    if pending_damage > 0.0 {
        let effective = (pending_damage - derived.get(StatKind::Armor)).max(crate::constants::DAMAGE_FLOOR);
        derived.add(StatKind::Health, -effective);
        base.set(StatKind::Health, derived.get(StatKind::Health));
    }

    let clamped = derived
        .get(StatKind::Health)
        .clamp(0.0, derived.get(StatKind::MaxHealth));
    derived.set(StatKind::Health, clamped);
    base.set(StatKind::Health, clamped);

    derived
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::{Item, ItemKind};

    fn armor_with(kind: StatKind, value: f32) -> Item {
        let mut bonuses = StatBlock::zero();
        bonuses.set(kind, value);
        Item {
            name: "Test Armor".to_string(),
            kind: ItemKind::Armor,
            bonuses,
        }
    }

    #[test]
    fn test_health_fraction_clamps_and_handles_zero_max() {
        let mut block = StatBlock::player_defaults();
        block.set(StatKind::Health, 70.0);
        assert_eq!(block.health_fraction(), 0.7);
        block.set(StatKind::Health, -5.0);
        assert_eq!(block.health_fraction(), 0.0);
        block.set(StatKind::MaxHealth, 0.0);
        assert_eq!(block.health_fraction(), 0.0);
    }

    #[test]
    fn test_derive_is_pure_read_without_damage() {
        let mut base = StatBlock::player_defaults();
        let equipment = Equipment::new();
        let first = derive_stats(&mut base, &equipment, 0.0);
        let second = derive_stats(&mut base, &equipment, 0.0);
        assert_eq!(first, second);
        assert_eq!(base, StatBlock::player_defaults());
    }

    #[test]
    fn test_unmitigated_damage() {
        let mut base = StatBlock::player_defaults();
        let equipment = Equipment::new();
        let derived = derive_stats(&mut base, &equipment, 30.0);
        assert_eq!(derived.get(StatKind::Health), 70.0);
        assert_eq!(base.get(StatKind::Health), 70.0);
    }

    #[test]
    fn test_damage_floor_pierces_armor() {
        let mut base = StatBlock::player_defaults();
        base.set(StatKind::Armor, 10.0);
        let equipment = Equipment::new();
        let derived = derive_stats(&mut base, &equipment, 5.0);
        // max(1, 5 - 10) = 1
        assert_eq!(derived.get(StatKind::Health), 99.0);
    }

    #[test]
    fn test_armor_health_bonus_raises_max_health() {
        let mut base = StatBlock::player_defaults();
        let mut equipment = Equipment::new();
        equipment.armor = Some(armor_with(StatKind::Health, 50.0));
        let derived = derive_stats(&mut base, &equipment, 0.0);
        assert_eq!(derived.get(StatKind::MaxHealth), 150.0);
        // Current health untouched
        assert_eq!(derived.get(StatKind::Health), 100.0);
    }

    #[test]
    fn test_health_clamped_after_unequipping_armor() {
        let mut base = StatBlock::player_defaults();
        base.set(StatKind::Health, 150.0); // healed while MaxHealth was boosted
        let equipment = Equipment::new();
        let derived = derive_stats(&mut base, &equipment, 0.0);
        assert_eq!(derived.get(StatKind::Health), 100.0);
        assert_eq!(base.get(StatKind::Health), 100.0);
    }

    #[test]
    fn test_health_stays_in_bounds_over_derive_sequence() {
        let mut base = StatBlock::player_defaults();
        let equipment = Equipment::new();
        for damage in [0.0, 40.0, 0.0, 200.0, 0.0] {
            let derived = derive_stats(&mut base, &equipment, damage);
            let health = derived.get(StatKind::Health);
            assert!(health >= 0.0);
            assert!(health <= derived.get(StatKind::MaxHealth));
        }
        // Lethal damage bottoms out at zero
        assert_eq!(base.get(StatKind::Health), 0.0);
    }

    #[test]
    fn test_wildboy_bonus_applies_unconditionally() {
        use crate::items::{Condition, Ordering, WildboyModifier};

        let mut bonuses = StatBlock::zero();
        bonuses.set(StatKind::AttackDamage, 20.0);
        let mut equipment = Equipment::new();
        equipment.wildboys.push(WildboyModifier {
            name: "Wildboy of Girth + 20 AD (if MH > 120)".to_string(),
            bonuses,
            condition: Condition {
                stat: StatKind::MaxHealth,
                ordering: Ordering::Greater,
                threshold: 120.0,
            },
        });

        let mut base = StatBlock::player_defaults();
        let derived = derive_stats(&mut base, &equipment, 0.0);
        // MaxHealth is 100, so the flavor condition is false - bonus applies anyway
        assert_eq!(derived.get(StatKind::AttackDamage), 30.0);
    }
}
