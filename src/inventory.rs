//! Inventory and equipment management.
//!
//! An item instance lives in exactly one of the two containers at a time;
//! every operation here is a move, never a copy. Equip swaps with the
//! currently equipped item, so the total item count is preserved across any
//! sequence of equip/unequip calls.

use crate::constants::{INVENTORY_ARMOR_CAP, INVENTORY_WEAPON_CAP};
use crate::items::{Item, ItemKind, WildboyModifier};

/// Unequipped items carried by the player: up to 3 weapons and 3 armor.
#[derive(Clone, Debug, Default)]
pub struct Inventory {
    pub weapons: Vec<Item>,
    pub armor: Vec<Item>,
}

/// Items currently worn: one weapon slot, one armor slot, and every wildboy
/// ever selected (wildboys are permanent).
#[derive(Clone, Debug, Default)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub wildboys: Vec<WildboyModifier>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: ItemKind) -> &Vec<Item> {
        match kind {
            ItemKind::Weapon => &self.weapons,
            ItemKind::Armor => &self.armor,
        }
    }

    fn slot_mut(&mut self, kind: ItemKind) -> &mut Vec<Item> {
        match kind {
            ItemKind::Weapon => &mut self.weapons,
            ItemKind::Armor => &mut self.armor,
        }
    }

    fn cap(kind: ItemKind) -> usize {
        match kind {
            ItemKind::Weapon => INVENTORY_WEAPON_CAP,
            ItemKind::Armor => INVENTORY_ARMOR_CAP,
        }
    }

    /// Whether another item of this kind fits.
    pub fn has_space(&self, kind: ItemKind) -> bool {
        self.slot(kind).len() < Self::cap(kind)
    }

    /// Add an item, respecting the per-kind cap. Returns the item back to the
    /// caller when the inventory is full (pickup simply fails, nothing is
    /// destroyed).
    pub fn add(&mut self, item: Item) -> Result<(), Item> {
        if self.has_space(item.kind) {
            self.slot_mut(item.kind).push(item);
            Ok(())
        } else {
            Err(item)
        }
    }

    /// Permanently destroy an item (the shift-click delete in the UI).
    pub fn discard(&mut self, kind: ItemKind, index: usize) -> Option<Item> {
        let slot = self.slot_mut(kind);
        if index < slot.len() {
            Some(slot.remove(index))
        } else {
            None
        }
    }

    pub fn count(&self) -> usize {
        self.weapons.len() + self.armor.len()
    }
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot_mut(&mut self, kind: ItemKind) -> &mut Option<Item> {
        match kind {
            ItemKind::Weapon => &mut self.weapon,
            ItemKind::Armor => &mut self.armor,
        }
    }

    /// Weapons plus armor currently worn (wildboys are not items).
    pub fn item_count(&self) -> usize {
        self.weapon.iter().count() + self.armor.iter().count()
    }
}

/// Equip the inventory item at `index`, swapping out whatever occupied the
/// slot. Returns false when the index is invalid. Never changes the combined
/// item count.
pub fn equip(inventory: &mut Inventory, equipment: &mut Equipment, kind: ItemKind, index: usize) -> bool {
    let slot = inventory.slot_mut(kind);
    if index >= slot.len() {
        return false;
    }
    let chosen = slot.remove(index);
    if let Some(previous) = equipment.slot_mut(kind).replace(chosen) {
        // The removal above freed a slot, so this cannot overflow the cap
        inventory
            .slot_mut(kind)
            .push(previous);
    }
    true
}

/// Move the equipped item of `kind` back into the inventory. Fails (leaving
/// the item equipped) when the inventory has no room, so no item is ever
/// silently lost.
pub fn unequip(inventory: &mut Inventory, equipment: &mut Equipment, kind: ItemKind) -> bool {
    if !inventory.has_space(kind) {
        return false;
    }
    match equipment.slot_mut(kind).take() {
        Some(item) => {
            inventory.slot_mut(kind).push(item);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::generate_equipment;
    use crate::stats::StatBlock;

    fn item(kind: ItemKind, name: &str) -> Item {
        Item {
            name: name.to_string(),
            kind,
            bonuses: StatBlock::zero(),
        }
    }

    #[test]
    fn test_inventory_cap() {
        let mut inventory = Inventory::new();
        for i in 0..3 {
            assert!(inventory.add(item(ItemKind::Weapon, &format!("w{i}"))).is_ok());
        }
        let overflow = inventory.add(item(ItemKind::Weapon, "w3"));
        assert!(overflow.is_err());
        assert_eq!(inventory.weapons.len(), 3);
        // Armor slots are independent of weapon slots
        assert!(inventory.add(item(ItemKind::Armor, "a0")).is_ok());
    }

    #[test]
    fn test_equip_moves_and_swaps() {
        let mut inventory = Inventory::new();
        let mut equipment = Equipment::new();
        inventory.add(item(ItemKind::Weapon, "first")).unwrap();
        inventory.add(item(ItemKind::Weapon, "second")).unwrap();

        assert!(equip(&mut inventory, &mut equipment, ItemKind::Weapon, 0));
        assert_eq!(equipment.weapon.as_ref().unwrap().name, "first");
        assert_eq!(inventory.weapons.len(), 1);

        // Equipping again swaps the old weapon back into the inventory
        assert!(equip(&mut inventory, &mut equipment, ItemKind::Weapon, 0));
        assert_eq!(equipment.weapon.as_ref().unwrap().name, "second");
        assert_eq!(inventory.weapons.len(), 1);
        assert_eq!(inventory.weapons[0].name, "first");
    }

    #[test]
    fn test_unequip_fails_when_full() {
        let mut inventory = Inventory::new();
        let mut equipment = Equipment::new();
        equipment.weapon = Some(item(ItemKind::Weapon, "held"));
        for i in 0..3 {
            inventory.add(item(ItemKind::Weapon, &format!("w{i}"))).unwrap();
        }

        assert!(!unequip(&mut inventory, &mut equipment, ItemKind::Weapon));
        assert!(equipment.weapon.is_some());
        assert_eq!(inventory.weapons.len(), 3);
    }

    #[test]
    fn test_item_count_invariant_over_operation_sequence() {
        let mut rng = rand::thread_rng();
        let mut inventory = Inventory::new();
        let mut equipment = Equipment::new();
        inventory.add(generate_equipment(3, ItemKind::Weapon, &mut rng)).unwrap();
        inventory.add(generate_equipment(3, ItemKind::Weapon, &mut rng)).unwrap();
        inventory.add(generate_equipment(3, ItemKind::Armor, &mut rng)).unwrap();
        let total = inventory.count() + equipment.item_count();

        equip(&mut inventory, &mut equipment, ItemKind::Weapon, 0);
        equip(&mut inventory, &mut equipment, ItemKind::Weapon, 0);
        equip(&mut inventory, &mut equipment, ItemKind::Armor, 0);
        unequip(&mut inventory, &mut equipment, ItemKind::Armor);
        unequip(&mut inventory, &mut equipment, ItemKind::Weapon);
        equip(&mut inventory, &mut equipment, ItemKind::Weapon, 1);

        assert_eq!(inventory.count() + equipment.item_count(), total);
    }

    #[test]
    fn test_discard_removes_permanently() {
        let mut inventory = Inventory::new();
        inventory.add(item(ItemKind::Armor, "junk")).unwrap();
        let removed = inventory.discard(ItemKind::Armor, 0);
        assert_eq!(removed.unwrap().name, "junk");
        assert!(inventory.armor.is_empty());
        assert!(inventory.discard(ItemKind::Armor, 0).is_none());
    }
}
