//! Next-star and next-boxel queries over a layer's boxel grid.
//!
//! Every query is a pure function of its inputs: the navigator holds only a
//! shared reference to an immutable [`SectorTable`], and the known-index set
//! is whatever snapshot the caller passes for that call.

use std::{fmt, marker::PhantomData};

use tracing::debug;

use crate::{
    curves::{LayerCurve, hilbert::Hilbert},
    error::{Error, Field, Result},
    id64::{Address, decode},
    name::KnownIndexSet,
    ops::field_mask,
    sector::SectorTable,
};

/// Position of a boxel on its layer's curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurvePosition {
    /// Zero-based position.
    pub h: u32,
    /// Last valid position, `2^(3p) - 1`.
    pub max_h: u32,
}

/// Answers navigation queries, resolving names against a sector table.
///
/// The curve type defaults to [`Hilbert`]; any [`LayerCurve`] will do.
#[derive(Debug)]
pub struct Navigator<'a, C = Hilbert> {
    /// Table used to render names.
    sectors: &'a SectorTable,
    /// Curve used to order boxels.
    curve: PhantomData<C>,
}

impl<C> Clone for Navigator<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for Navigator<'_, C> {}

impl<'a, C: LayerCurve> Navigator<'a, C> {
    /// A navigator naming sectors from `sectors`.
    pub fn new(sectors: &'a SectorTable) -> Self {
        Self {
            sectors,
            curve: PhantomData,
        }
    }

    /// The sector table names are resolved against.
    pub fn sectors(&self) -> &'a SectorTable {
        self.sectors
    }

    /// The next object in the same boxel that is not in `known`.
    ///
    /// With an empty set this is the current index plus one; otherwise it is
    /// the smallest index missing from the set. Fails with
    /// [`Error::FieldOverflow`] if the result does not fit the index field.
    pub fn next_uncatalogued(&self, addr: &Address, known: &KnownIndexSet) -> Result<Address> {
        let next = if known.is_empty() {
            u64::from(addr.index) + 1
        } else {
            known.first_missing()
        };
        let width = addr.index_bits();
        if next > field_mask(width) {
            return Err(Error::FieldOverflow {
                field: Field::Index,
                value: next,
                width,
            });
        }
        debug!(from = addr.index, to = next, known = known.len(), "next uncatalogued index");
        Ok(addr.system().with_index(next as u32))
    }

    /// Name of the next uncatalogued object in the boxel of `id64`.
    pub fn next_uncatalogued_index(&self, id64: u64, known: &KnownIndexSet) -> Result<String> {
        let next = self.next_uncatalogued(&decode(id64), known)?;
        Ok(self.sectors.resolve_name(&next))
    }

    /// Curve position of the boxel containing `addr`.
    ///
    /// Fails with [`Error::NoSubdivision`] at mass code 7.
    pub fn current_position(&self, addr: &Address) -> Result<CurvePosition> {
        addr.validate()?;
        let curve = C::for_mass_code(addr.mass_code)?;
        Ok(CurvePosition {
            h: curve.index(&addr.boxel),
            max_h: curve.max_h(),
        })
    }

    /// First object of the boxel `offset` steps along the curve from `addr`.
    ///
    /// Returns `None` when `addr` sits on the curve's terminal cell. The
    /// target is clamped to `[0, max_h - 1]`, so the terminal cell is never
    /// the result of a move.
    pub fn boxel_at(&self, addr: &Address, offset: i64) -> Result<Option<Address>> {
        addr.validate()?;
        let curve = C::for_mass_code(addr.mass_code)?;
        let h = curve.index(&addr.boxel);
        let max_h = curve.max_h();
        if h == max_h {
            debug!(h, "boxel is the terminal cell of its layer");
            return Ok(None);
        }
        let target = i64::from(h)
            .saturating_add(offset)
            .clamp(0, i64::from(max_h) - 1) as u32;
        debug!(h, offset, target, max_h, "stepping along layer");
        Ok(curve
            .point(target)
            .map(|boxel| addr.system().with_boxel(boxel).with_index(0)))
    }

    /// Name of the first object of the boxel `offset` steps from `id64`.
    pub fn boxel_at_offset(&self, id64: u64, offset: i64) -> Result<Option<String>> {
        Ok(self
            .boxel_at(&decode(id64), offset)?
            .map(|next| self.sectors.resolve_name(&next)))
    }

    /// Everything a surveyor needs to know about `id64` at once.
    pub fn survey(
        &self,
        id64: u64,
        known: &KnownIndexSet,
        options: SurveyOptions,
    ) -> Result<Survey> {
        let addr = decode(id64);
        let empty = KnownIndexSet::new();
        let skip = if options.skip_known { known } else { &empty };
        let next_star = self.sectors.resolve_name(&self.next_uncatalogued(&addr, skip)?);

        let stepper = match self.current_position(&addr) {
            Ok(position) => {
                let mut stepper = OffsetStepper::new(position);
                stepper.step(options.steps);
                Some(stepper)
            }
            Err(Error::NoSubdivision { .. }) => None,
            Err(e) => return Err(e),
        };
        let next_boxel = match stepper {
            Some(s) => self.boxel_at_offset(id64, s.offset())?,
            None => None,
        };

        Ok(Survey {
            name: self.sectors.resolve_name(&addr),
            next_star,
            next_boxel,
            stepper,
            known: known.len(),
            estimate: known.estimate(),
        })
    }
}

/// Offset state behind the previous/next boxel controls.
///
/// The offset starts at 1 and never rests on 0: stepping up from -1 lands on
/// 1, and stepping down from 1 lands on -1. A step that would move
/// `h + offset` outside `[0, max_h]` leaves the offset unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetStepper {
    /// Position the offset is relative to.
    position: CurvePosition,
    /// Current signed offset.
    offset: i64,
}

impl OffsetStepper {
    /// Offset of a fresh stepper.
    pub const DEFAULT_OFFSET: i64 = 1;

    /// A stepper at the default offset.
    pub fn new(position: CurvePosition) -> Self {
        Self {
            position,
            offset: Self::DEFAULT_OFFSET,
        }
    }

    /// Current offset.
    pub fn offset(&self) -> i64 {
        self.offset
    }

    /// Position the offset is relative to.
    pub fn position(&self) -> CurvePosition {
        self.position
    }

    /// Curve position the offset points at.
    pub fn target(&self) -> i64 {
        i64::from(self.position.h) + self.offset
    }

    /// True while the target is below the last cell.
    pub fn can_increment(&self) -> bool {
        self.target() < i64::from(self.position.max_h)
    }

    /// True while the target is above the first cell.
    pub fn can_decrement(&self) -> bool {
        self.target() > 0
    }

    /// Step the offset up. Returns false if it was already at the boundary.
    pub fn increment(&mut self) -> bool {
        let step = if self.offset == -1 { 2 } else { 1 };
        if self.target() + step > i64::from(self.position.max_h) {
            return false;
        }
        self.offset += step;
        true
    }

    /// Step the offset down. Returns false if it was already at the boundary.
    pub fn decrement(&mut self) -> bool {
        let step = if self.offset == 1 { 2 } else { 1 };
        if self.target() - step < 0 {
            return false;
        }
        self.offset -= step;
        true
    }

    /// Apply `n` increments, or `-n` decrements when `n` is negative,
    /// stopping early at a boundary.
    pub fn step(&mut self, n: i64) {
        for _ in 0..n.unsigned_abs() {
            let moved = if n > 0 {
                self.increment()
            } else {
                self.decrement()
            };
            if !moved {
                break;
            }
        }
    }
}

/// Inputs to [`Navigator::survey`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurveyOptions {
    /// Skip indices already catalogued when picking the next star.
    pub skip_known: bool,
    /// Stepper moves applied before picking the next boxel.
    pub steps: i64,
}

impl Default for SurveyOptions {
    fn default() -> Self {
        Self {
            skip_known: true,
            steps: 0,
        }
    }
}

/// Snapshot of one system's survey state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Survey {
    /// Name of the surveyed system.
    pub name: String,
    /// Next uncatalogued star in the same boxel.
    pub next_star: String,
    /// First star of the boxel at the stepper's offset, if any.
    pub next_boxel: Option<String>,
    /// Offset state; absent at mass code 7.
    pub stepper: Option<OffsetStepper>,
    /// Number of known indices in the boxel.
    pub known: usize,
    /// Estimated population of the boxel.
    pub estimate: Option<u64>,
}

impl fmt::Display for Survey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "System: {}", self.name)?;
        match self.estimate {
            Some(estimate) => writeln!(f, "{} Known | {estimate} Estim.", self.known)?,
            None => writeln!(f, "No Boxel Stats Available")?,
        }
        writeln!(f, "Next Star: {}", self.next_star)?;
        writeln!(f, "Next Boxel: {}", self.next_boxel.as_deref().unwrap_or("-"))?;
        if let Some(s) = self.stepper {
            writeln!(f, "Boxel {} ({:+})", s.position().h, s.offset())?;
        }
        Ok(())
    }
}
