//! Round-robin supply and demand distribution.
//!
//! Units are dealt one at a time over the recipient list in assignment order,
//! restarting at the front until the total is spent. The dealt result is
//! computed directly: every recipient receives `total / k` units and the first
//! `total % k` recipients receive one more, which is exactly where the
//! unit-by-unit deal leaves the excess.

use tracing::instrument;

use super::roles::RoleAssignment;
use crate::{
    Result,
    error::RoadmapError,
    graph::{Node, NodeId},
    params::GenerationParameters,
};

#[derive(Clone, Copy)]
enum Ledger {
    Supply,
    Demand,
}

impl Ledger {
    const fn purpose(self) -> &'static str {
        match self {
            Self::Supply => "supply recipient",
            Self::Demand => "demand recipient",
        }
    }

    fn slots(self, node: &mut Node) -> &mut [u64] {
        match self {
            Self::Supply => node.supply_mut(),
            Self::Demand => node.demand_mut(),
        }
    }
}

/// Fills warehouse supply and store demand for every good type.
#[instrument(
    name = "core.distribute_goods",
    err,
    skip(nodes, assignment, params),
    fields(goods = params.good_type_count()),
)]
pub(crate) fn distribute_goods(
    nodes: &mut [Node],
    assignment: &RoleAssignment,
    params: &GenerationParameters,
) -> Result<()> {
    for (good, totals) in params.goods().iter().enumerate() {
        deal(nodes, &assignment.warehouses, good, totals.supply, Ledger::Supply)?;
        deal(nodes, &assignment.stores, good, totals.demand, Ledger::Demand)?;
    }
    Ok(())
}

#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "round-robin shares are the quotient and remainder of the total"
)]
fn deal(
    nodes: &mut [Node],
    recipients: &[NodeId],
    good: usize,
    total: u64,
    ledger: Ledger,
) -> Result<()> {
    if total == 0 {
        return Ok(());
    }
    let count = u64::try_from(recipients.len()).unwrap_or(u64::MAX);
    if count == 0 {
        return Err(RoadmapError::SamplingExhausted {
            purpose: ledger.purpose(),
        });
    }
    let base = total / count;
    let remainder = total % count;

    for (position, &id) in (0_u64..).zip(recipients) {
        let share = base.saturating_add(u64::from(position < remainder));
        let node = nodes
            .get_mut(id.get())
            .ok_or(RoadmapError::UnknownNode { node: id.get() })?;
        let slot = ledger
            .slots(node)
            .get_mut(good)
            .ok_or(RoadmapError::UnknownNode { node: id.get() })?;
        *slot = slot.saturating_add(share);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::graph::{NodeRole, Position};
    use crate::params::GenerationRequest;

    /// Literal unit-by-unit deal used as the reference for the closed form.
    fn deal_one_by_one(recipients: usize, mut remaining: u64) -> Vec<u64> {
        let mut shares = vec![0; recipients];
        while remaining > 0 {
            for share in &mut shares {
                if remaining == 0 {
                    break;
                }
                *share += 1;
                remaining -= 1;
            }
        }
        shares
    }

    fn build(
        node_count: usize,
        stores: &[usize],
        warehouses: &[usize],
        supply: Vec<u64>,
        demand: Vec<u64>,
    ) -> (Vec<Node>, RoleAssignment, GenerationParameters) {
        let params = GenerationRequest {
            node_count,
            max_edges_per_node: 1,
            store_count: stores.len(),
            warehouse_count: warehouses.len(),
            good_type_count: supply.len(),
            supply,
            demand,
        }
        .validate()
        .expect("test parameters are valid");
        let mut nodes: Vec<Node> = (0..node_count)
            .map(|id| {
                Node::new(
                    NodeId::new(id),
                    Position { x: 0.0, y: 0.0 },
                    params.good_type_count(),
                )
            })
            .collect();
        for &id in stores {
            assert!(nodes[id].promote(NodeRole::Store));
        }
        for &id in warehouses {
            assert!(nodes[id].promote(NodeRole::Warehouse));
        }
        let assignment = RoleAssignment {
            stores: stores.iter().copied().map(NodeId::new).collect(),
            warehouses: warehouses.iter().copied().map(NodeId::new).collect(),
        };
        (nodes, assignment, params)
    }

    #[rstest]
    #[case::even(3, 9)]
    #[case::remainder(3, 10)]
    #[case::fewer_units_than_recipients(4, 2)]
    #[case::single(1, 7)]
    #[case::zero(5, 0)]
    fn closed_form_matches_unit_deal(#[case] recipients: usize, #[case] total: u64) {
        let warehouses: Vec<usize> = (0..recipients).collect();
        let node_count = recipients + 1;
        let (mut nodes, assignment, params) =
            build(node_count, &[recipients], &warehouses, vec![total], vec![0]);

        distribute_goods(&mut nodes, &assignment, &params).expect("distribution succeeds");

        let dealt: Vec<u64> = warehouses.iter().map(|&id| nodes[id].supply()[0]).collect();
        assert_eq!(dealt, deal_one_by_one(recipients, total));
    }

    #[test]
    fn excess_lands_on_earliest_assigned_recipients() {
        // Assignment order, not id order, decides who gets the remainder.
        let (mut nodes, assignment, params) = build(5, &[0], &[4, 1, 3], vec![5], vec![1]);
        distribute_goods(&mut nodes, &assignment, &params).expect("distribution succeeds");
        assert_eq!(nodes[4].supply(), &[2]);
        assert_eq!(nodes[1].supply(), &[2]);
        assert_eq!(nodes[3].supply(), &[1]);
    }

    #[test]
    fn ledgers_stay_on_matching_roles() {
        let (mut nodes, assignment, params) =
            build(6, &[1, 2], &[3], vec![4, 1], vec![3, 8]);
        distribute_goods(&mut nodes, &assignment, &params).expect("distribution succeeds");

        assert_eq!(nodes[3].supply(), &[4, 1]);
        assert_eq!(nodes[1].demand(), &[2, 4]);
        assert_eq!(nodes[2].demand(), &[1, 4]);
        for node in &nodes {
            if node.role() != NodeRole::Warehouse {
                assert!(node.supply().iter().all(|&units| units == 0));
            }
            if node.role() != NodeRole::Store {
                assert!(node.demand().iter().all(|&units| units == 0));
            }
        }
    }

    #[test]
    fn huge_totals_are_conserved() {
        let (mut nodes, assignment, params) =
            build(4, &[0], &[1, 2, 3], vec![u64::MAX], vec![u64::MAX]);
        distribute_goods(&mut nodes, &assignment, &params).expect("distribution succeeds");
        let dealt: u128 = [1, 2, 3]
            .iter()
            .map(|&id| u128::from(nodes[id].supply()[0]))
            .sum();
        assert_eq!(dealt, u128::from(u64::MAX));
        assert_eq!(nodes[0].demand(), &[u64::MAX]);
    }

    #[test]
    fn missing_recipients_are_reported() {
        let (mut nodes, _, params) = build(3, &[0], &[1], vec![2], vec![0]);
        let empty = RoleAssignment::default();
        let err = distribute_goods(&mut nodes, &empty, &params)
            .expect_err("supply without warehouses must fail");
        assert_eq!(
            err,
            RoadmapError::SamplingExhausted {
                purpose: "supply recipient"
            }
        );
    }
}
