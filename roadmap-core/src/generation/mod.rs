//! Generation pipeline stages.
//!
//! Stages run strictly in order over one exclusively owned node list:
//! placement, role assignment, supply/demand distribution, edge synthesis.

mod distribution;
mod edges;
mod placer;
mod roles;
mod sampling;

pub(crate) use distribution::distribute_goods;
pub(crate) use edges::synthesize_edges;
pub(crate) use placer::place_nodes;
pub(crate) use roles::{RoleAssignment, assign_roles};
