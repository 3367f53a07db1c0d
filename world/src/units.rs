//! Units standing on the map and their movement and combat.

use std::collections::BTreeMap;

use reef_defence_core::{GridCoord, Owner, TierTuning, UnitId, UnitTier};

use crate::Map;

/// A single unit owned by the player or the enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct Unit {
    id: UnitId,
    owner: Owner,
    tier: UnitTier,
    coord: GridCoord,
    health: f32,
    max_health: f32,
    attack_damage: f32,
    step_interval: f32,
    step_timer: f32,
    destination: Option<GridCoord>,
}

impl Unit {
    /// Identifier of the unit.
    #[must_use]
    pub fn id(&self) -> UnitId {
        self.id
    }

    /// Side the unit fights for.
    #[must_use]
    pub fn owner(&self) -> Owner {
        self.owner
    }

    /// Tier the unit was trained or spawned at.
    #[must_use]
    pub fn tier(&self) -> UnitTier {
        self.tier
    }

    /// Tile the unit stands on.
    #[must_use]
    pub fn coord(&self) -> GridCoord {
        self.coord
    }

    /// Remaining health points.
    #[must_use]
    pub fn health(&self) -> f32 {
        self.health
    }

    /// Health fraction in `[0, 1]`.
    #[must_use]
    pub fn health_ratio(&self) -> f32 {
        if self.max_health <= 0.0 {
            return 0.0;
        }
        (self.health / self.max_health).clamp(0.0, 1.0)
    }

    /// Damage dealt per second of contact.
    #[must_use]
    pub fn attack_damage(&self) -> f32 {
        self.attack_damage
    }

    /// Tile the unit was ordered to walk to, if any.
    #[must_use]
    pub fn destination(&self) -> Option<GridCoord> {
        self.destination
    }
}

/// Unit removed from the map after its health dropped to zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Casualty {
    /// Identifier the unit carried.
    pub id: UnitId,
    /// Side the unit fought for.
    pub owner: Owner,
    /// Tier of the fallen unit.
    pub tier: UnitTier,
}

/// Every unit alive on the map keyed by identifier.
#[derive(Clone, Debug, Default)]
pub struct UnitRoster {
    units: BTreeMap<UnitId, Unit>,
    next_id: u32,
}

impl UnitRoster {
    /// Creates an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of living units.
    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Whether no unit is alive.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Looks up a unit by identifier.
    #[must_use]
    pub fn get(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(&id)
    }

    /// Iterates over the living units in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &Unit> {
        self.units.values()
    }

    /// Counts the living units owned by `owner`.
    #[must_use]
    pub fn count_owned(&self, owner: Owner) -> usize {
        self.units.values().filter(|unit| unit.owner == owner).count()
    }

    /// Places a new unit on an empty, unlocked tile.
    pub fn spawn(
        &mut self,
        map: &mut Map,
        owner: Owner,
        tier: UnitTier,
        stats: &TierTuning,
        coord: GridCoord,
    ) -> Option<UnitId> {
        if !map.contains(coord) {
            return None;
        }
        let tile = map.tile(coord);
        if tile.is_unit_on_tile() || map.is_locked(tile.kind()) {
            return None;
        }

        let id = UnitId::new(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        map.set_unit(coord, Some(id));
        let _ = self.units.insert(
            id,
            Unit {
                id,
                owner,
                tier,
                coord,
                health: stats.health,
                max_health: stats.health,
                attack_damage: stats.attack_damage,
                step_interval: stats.step_interval,
                step_timer: 0.0,
                destination: None,
            },
        );
        Some(id)
    }

    /// Removes a unit and frees its tile.
    pub fn remove(&mut self, map: &mut Map, id: UnitId) -> Option<Unit> {
        let unit = self.units.remove(&id)?;
        if map.tile(unit.coord).unit() == Some(id) {
            map.set_unit(unit.coord, None);
        }
        Some(unit)
    }

    /// Orders a unit to walk towards `destination`.
    pub fn set_destination(&mut self, id: UnitId, destination: GridCoord) -> bool {
        match self.units.get_mut(&id) {
            Some(unit) => {
                unit.destination = Some(destination);
                true
            }
            None => false,
        }
    }

    /// Moves every unit at most one tile closer to its goal.
    ///
    /// Enemy units march on `enemy_goal` and halt once adjacent to it. Player
    /// units walk to their destination, if they have one.
    pub fn advance(&mut self, map: &mut Map, dt: f32, enemy_goal: GridCoord) {
        for unit in self.units.values_mut() {
            unit.step_timer = (unit.step_timer + dt.max(0.0)).min(unit.step_interval);
            if unit.step_timer < unit.step_interval {
                continue;
            }

            let goal = match unit.owner {
                Owner::Enemy => {
                    if map.surrounding_coords(unit.coord).contains(&enemy_goal) {
                        continue;
                    }
                    enemy_goal
                }
                Owner::Player => match unit.destination {
                    Some(destination) if destination == unit.coord => {
                        unit.destination = None;
                        continue;
                    }
                    Some(destination) => destination,
                    None => continue,
                },
            };

            if let Some(next) = next_step(map, unit.coord, goal) {
                map.set_unit(unit.coord, None);
                map.set_unit(next, Some(unit.id));
                unit.coord = next;
                unit.step_timer = 0.0;
            }
        }
    }

    /// Lets adjacent opposing units damage each other for `dt` seconds.
    ///
    /// Units whose health drops to zero are removed and reported.
    pub fn skirmish(&mut self, map: &mut Map, dt: f32) -> Vec<Casualty> {
        let mut damage: BTreeMap<UnitId, f32> = BTreeMap::new();
        for attacker in self.units.values() {
            let target = map
                .surrounding_coords(attacker.coord)
                .into_iter()
                .filter_map(|coord| map.tile(coord).unit())
                .find(|id| {
                    self.units
                        .get(id)
                        .is_some_and(|other| other.owner != attacker.owner)
                });
            if let Some(target) = target {
                *damage.entry(target).or_insert(0.0) += attacker.attack_damage * dt.max(0.0);
            }
        }

        let mut fallen = Vec::new();
        for (id, amount) in damage {
            if let Some(unit) = self.units.get_mut(&id) {
                unit.health -= amount;
                if unit.health <= 0.0 {
                    fallen.push(id);
                }
            }
        }

        fallen
            .into_iter()
            .filter_map(|id| self.remove(map, id))
            .map(|unit| Casualty {
                id: unit.id,
                owner: unit.owner,
                tier: unit.tier,
            })
            .collect()
    }
}

fn next_step(map: &Map, from: GridCoord, goal: GridCoord) -> Option<GridCoord> {
    let target = map.tile(goal).center();
    let current = map.tile(from).center().distance_squared(target);
    map.surrounding_coords(from)
        .into_iter()
        .filter(|coord| {
            let tile = map.tile(*coord);
            !tile.is_unit_on_tile() && !map.is_locked(tile.kind())
        })
        .map(|coord| (coord, map.tile(coord).center().distance_squared(target)))
        .filter(|(_, distance)| *distance < current)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(coord, _)| coord)
}
