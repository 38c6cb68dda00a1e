//! Role-specific views over a load set.
//!
//! Everything here is pure and recomputed from the current load set on
//! every render; there is no incremental accumulator state to drift.

use std::collections::HashMap;

use super::entities::{Load, LoadStatus};

/// What a driver sees: open market, their own active trips, and the trips
/// they have already delivered.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DriverBoard {
    pub available: Vec<Load>,
    pub mine: Vec<Load>,
    pub delivered: Vec<Load>,
}

impl DriverBoard {
    /// Sum of prices over the delivered partition.
    pub fn earnings(&self) -> i64 {
        self.delivered.iter().map(|load| load.price).sum()
    }
}

/// What a company sees across its own postings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CompanyBoard {
    /// Not yet delivered: still needs attention.
    pub open: Vec<Load>,
    /// Accepted or in transit: a truck is assigned.
    pub active: Vec<Load>,
    pub completed: Vec<Load>,
}

impl CompanyBoard {
    /// Sum of prices over the completed partition.
    pub fn spend(&self) -> i64 {
        self.completed.iter().map(|load| load.price).sum()
    }
}

/// Partition a driver-scoped load set. `available` is the posted pool,
/// `mine` is accepted/in-transit loads assigned to this driver, and
/// `delivered` is everything settled.
pub fn driver_board(loads: &[Load], driver_id: &str) -> DriverBoard {
    let mut board = DriverBoard::default();
    for load in loads {
        match load.status {
            LoadStatus::Posted => board.available.push(load.clone()),
            status if status.is_active() => {
                if load.driver_id.as_deref() == Some(driver_id) {
                    board.mine.push(load.clone());
                }
            }
            status if status.is_settled() => board.delivered.push(load.clone()),
            // `picked` is cosmetic; treat it like the active leg it sits in.
            _ => {
                if load.driver_id.as_deref() == Some(driver_id) {
                    board.mine.push(load.clone());
                }
            }
        }
    }
    board
}

/// Partition a company-scoped load set. `active` is a sub-view of `open`,
/// mirroring the dashboard sections.
pub fn company_board(loads: &[Load]) -> CompanyBoard {
    let mut board = CompanyBoard::default();
    for load in loads {
        if load.status.is_settled() {
            board.completed.push(load.clone());
        } else {
            board.open.push(load.clone());
            if load.status.is_active() || load.status == LoadStatus::Picked {
                board.active.push(load.clone());
            }
        }
    }
    board
}

/// Union of the posted pool and a driver's own loads, de-duplicated by id.
/// When a load shows up in both result sets the own-loads entry wins: it
/// is applied last, so its status/driver fields overwrite the posted copy.
pub fn merge_posted_and_own(posted: Vec<Load>, own: Vec<Load>) -> Vec<Load> {
    let mut merged: Vec<Load> = Vec::with_capacity(posted.len() + own.len());
    let mut index: HashMap<String, usize> = HashMap::new();

    for load in posted.into_iter().chain(own) {
        match index.get(&load.id) {
            Some(&slot) => merged[slot] = load,
            None => {
                index.insert(load.id.clone(), merged.len());
                merged.push(load);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::TruckType;
    use time::OffsetDateTime;

    fn load(id: &str, status: LoadStatus, driver_id: Option<&str>, price: i64) -> Load {
        Load {
            id: id.to_string(),
            company_id: "co-1".to_string(),
            driver_id: driver_id.map(str::to_string),
            pickup_city: "Indore".to_string(),
            pickup_state: "Madhya Pradesh".to_string(),
            drop_city: "Nagpur".to_string(),
            drop_state: "Maharashtra".to_string(),
            material: "Cement bags".to_string(),
            weight: 12.5,
            truck_type: TruckType::OpenBody,
            price,
            pickup_date: None,
            status,
            created_at: OffsetDateTime::UNIX_EPOCH,
            company_name: None,
            distance_km: None,
        }
    }

    #[test]
    fn driver_partitions_cover_every_scoped_load() {
        let loads = vec![
            load("l1", LoadStatus::Posted, None, 40000),
            load("l2", LoadStatus::Accepted, Some("drv-a"), 55000),
            load("l3", LoadStatus::InTransit, Some("drv-a"), 62000),
            load("l4", LoadStatus::Delivered, Some("drv-a"), 85000),
            load("l5", LoadStatus::Completed, Some("drv-a"), 62000),
        ];
        let board = driver_board(&loads, "drv-a");
        assert_eq!(board.available.len(), 1);
        assert_eq!(board.mine.len(), 2);
        assert_eq!(board.delivered.len(), 2);
        assert_eq!(
            board.available.len() + board.mine.len() + board.delivered.len(),
            loads.len()
        );
    }

    #[test]
    fn driver_mine_excludes_other_drivers() {
        let loads = vec![load("l1", LoadStatus::Accepted, Some("drv-b"), 30000)];
        let board = driver_board(&loads, "drv-a");
        assert!(board.mine.is_empty());
        assert!(board.available.is_empty());
    }

    #[test]
    fn driver_earnings_sum_the_delivered_partition_exactly() {
        let loads = vec![
            load("l1", LoadStatus::Completed, Some("drv-a"), 85000),
            load("l2", LoadStatus::Completed, Some("drv-a"), 62000),
            load("l3", LoadStatus::Accepted, Some("drv-a"), 99999),
        ];
        assert_eq!(driver_board(&loads, "drv-a").earnings(), 147000);
    }

    #[test]
    fn company_partitions_and_spend() {
        let loads = vec![
            load("l1", LoadStatus::Posted, None, 40000),
            load("l2", LoadStatus::Accepted, Some("drv-a"), 55000),
            load("l3", LoadStatus::Delivered, Some("drv-a"), 85000),
            load("l4", LoadStatus::Completed, Some("drv-b"), 62000),
        ];
        let board = company_board(&loads);
        assert_eq!(board.open.len(), 2);
        assert_eq!(board.active.len(), 1);
        assert_eq!(board.completed.len(), 2);
        assert_eq!(board.spend(), 147000);
    }

    #[test]
    fn empty_load_set_yields_empty_partitions_not_errors() {
        let board = company_board(&[]);
        assert!(board.open.is_empty());
        assert!(board.active.is_empty());
        assert!(board.completed.is_empty());
        assert_eq!(board.spend(), 0);

        let board = driver_board(&[], "drv-a");
        assert!(board.available.is_empty());
        assert_eq!(board.earnings(), 0);
    }

    #[test]
    fn merge_keeps_one_copy_with_own_loads_winning() {
        // The same load id from the posted query (stale) and the own query
        // (already accepted by me).
        let posted = vec![
            load("l1", LoadStatus::Posted, None, 40000),
            load("l2", LoadStatus::Posted, None, 50000),
        ];
        let own = vec![load("l1", LoadStatus::Accepted, Some("drv-a"), 40000)];

        let merged = merge_posted_and_own(posted, own);
        assert_eq!(merged.len(), 2);
        let winner = merged.iter().find(|l| l.id == "l1").unwrap();
        assert_eq!(winner.status, LoadStatus::Accepted);
        assert_eq!(winner.driver_id.as_deref(), Some("drv-a"));
    }

    #[test]
    fn merge_of_identical_sets_is_idempotent() {
        let posted = vec![load("l1", LoadStatus::Posted, None, 40000)];
        let first = merge_posted_and_own(posted.clone(), Vec::new());
        let second = merge_posted_and_own(posted, Vec::new());
        assert_eq!(first, second);
    }
}
