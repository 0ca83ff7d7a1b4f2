use crate::{Phase, codec::DescriptorCodec, start, success, working};
use cube3::Move;
use log::{debug, info};
use std::time::Instant;
use thiserror::Error;

/// The move that brings a descriptor one step closer to solved, and the
/// descriptor it leads to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub move_: Move,
    pub successor: u32,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableBuildError {
    #[error("The {phase} move set contains {move_} but not its inverse")]
    MoveSetNotClosed { phase: Phase, move_: Move },
    #[error("The {phase} solved descriptor {solved} is outside [0, {count})")]
    SolvedOutOfRange { phase: Phase, solved: u32, count: u32 },
    #[error("The {phase} transition of {from} by {move_} gave {to}, outside [0, {count})")]
    DescriptorOutOfRange {
        phase: Phase,
        from: u32,
        move_: Move,
        to: u32,
        count: u32,
    },
    #[error(
        "The {phase} transitions are inconsistent: {from} goes to {to} by {move_} but its inverse leads to {back}"
    )]
    Inconsistent {
        phase: Phase,
        from: u32,
        move_: Move,
        to: u32,
        back: u32,
    },
    #[error("Only {visited} of the {count} {phase} descriptors are reachable from solved")]
    Unreachable { phase: Phase, visited: u32, count: u32 },
}

/// For every descriptor of a phase, the first move of a shortest path to the
/// solved descriptor using the phase's moves.
#[derive(Clone, Debug)]
pub struct TransitionTable {
    phase: Phase,
    solved: u32,
    steps: Vec<Option<Step>>,
    distances: Vec<u8>,
    layer_sizes: Vec<u32>,
}

const UNVISITED: u8 = u8::MAX;

impl TransitionTable {
    /// Builds the table for `codec`'s phase.
    ///
    /// # Errors
    ///
    /// See `build_with`.
    pub fn build(codec: &dyn DescriptorCodec) -> Result<Self, TableBuildError> {
        let phase = codec.phase();
        Self::build_with(
            phase,
            phase.moves(),
            codec.descriptor_count(),
            codec.solved_descriptor(),
            |descriptor, column| codec.transition(descriptor, column),
        )
    }

    /// Breadth first search outwards from `solved`. When `transition` first
    /// reaches `d'` from `d` by `m`, `d'` records the step `(m⁻¹, d)`. Ties go
    /// to the earlier move in `moves`.
    ///
    /// `transition(d, column)` moves `d` by `moves[column]`.
    ///
    /// # Errors
    ///
    /// Every error here is a bug in the codec or the move set: `moves` not
    /// closed under inverses, a transition leaving `[0, count)` or not undone
    /// by the inverse move, or descriptors that cannot be reached.
    pub fn build_with(
        phase: Phase,
        moves: &[Move],
        count: u32,
        solved: u32,
        transition: impl Fn(u32, usize) -> u32,
    ) -> Result<Self, TableBuildError> {
        info!(start!("Building the {} table over {} descriptors"), phase, count);
        let start = Instant::now();

        let inverse_columns = moves
            .iter()
            .map(|&move_| {
                moves
                    .iter()
                    .position(|&m| m == move_.inverse())
                    .ok_or(TableBuildError::MoveSetNotClosed { phase, move_ })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if solved >= count {
            return Err(TableBuildError::SolvedOutOfRange {
                phase,
                solved,
                count,
            });
        }

        let mut steps = vec![None; count as usize];
        let mut distances = vec![UNVISITED; count as usize];
        distances[solved as usize] = 0;
        let mut layer_sizes = vec![1];
        let mut frontier = vec![solved];
        let mut next_frontier = vec![];
        let mut visited = 1_u32;

        while !frontier.is_empty() {
            let depth = layer_sizes.len() as u8;
            for &from in &frontier {
                for (column, &move_) in moves.iter().enumerate() {
                    let to = transition(from, column);
                    if to >= count {
                        return Err(TableBuildError::DescriptorOutOfRange {
                            phase,
                            from,
                            move_,
                            to,
                            count,
                        });
                    }
                    let back = transition(to, inverse_columns[column]);
                    if back != from {
                        return Err(TableBuildError::Inconsistent {
                            phase,
                            from,
                            move_,
                            to,
                            back,
                        });
                    }
                    if distances[to as usize] != UNVISITED {
                        continue;
                    }
                    distances[to as usize] = depth;
                    steps[to as usize] = Some(Step {
                        move_: move_.inverse(),
                        successor: from,
                    });
                    next_frontier.push(to);
                }
            }
            if !next_frontier.is_empty() {
                visited += next_frontier.len() as u32;
                layer_sizes.push(next_frontier.len() as u32);
                debug!(
                    working!("{} depth {}: {} descriptors"),
                    phase,
                    depth,
                    next_frontier.len()
                );
            }
            std::mem::swap(&mut frontier, &mut next_frontier);
            next_frontier.clear();
        }

        if visited != count {
            return Err(TableBuildError::Unreachable {
                phase,
                visited,
                count,
            });
        }

        let table = TransitionTable {
            phase,
            solved,
            steps,
            distances,
            layer_sizes,
        };
        info!(
            success!("Built the {} table in {:.3}s, deepest descriptor at {} moves"),
            phase,
            start.elapsed().as_secs_f64(),
            table.max_depth()
        );
        Ok(table)
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn descriptor_count(&self) -> u32 {
        self.steps.len() as u32
    }

    #[must_use]
    pub fn solved_descriptor(&self) -> u32 {
        self.solved
    }

    /// The step out of `descriptor`, `None` for the solved descriptor and
    /// anything out of range.
    #[must_use]
    pub fn step(&self, descriptor: u32) -> Option<Step> {
        self.steps.get(descriptor as usize).copied().flatten()
    }

    /// Moves from `descriptor` to solved.
    #[must_use]
    pub fn distance(&self, descriptor: u32) -> Option<u8> {
        self.distances
            .get(descriptor as usize)
            .copied()
            .filter(|&d| d != UNVISITED)
    }

    /// The largest distance of any descriptor.
    #[must_use]
    pub fn max_depth(&self) -> u8 {
        (self.layer_sizes.len() - 1) as u8
    }

    /// How many descriptors sit at each distance, starting from 0.
    #[must_use]
    pub fn layer_sizes(&self) -> &[u32] {
        &self.layer_sizes
    }
}
