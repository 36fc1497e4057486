//! Shape algebra: 4-bit cell codes, rotation, fanout, symmetry classification.
//!
//! A shape code is a 4-bit value whose bits indicate the presence of a
//! connection stub in each of the four cardinal directions, under the
//! canonical (unrotated) orientation. Bit 0 = north, bit 1 = east,
//! bit 2 = south, bit 3 = west.

/// 4-bit stub pattern of a cell in its canonical orientation.
pub type ShapeCode = u8;

/// 4-bit mask over the four possible clockwise rotations of a cell.
/// Bit *i* set means "rotating clockwise by *i* quarter-turns is still allowed".
pub type OptionsMask = u8;

pub const NORTH: u8 = 0b0001;
pub const EAST: u8 = 0b0010;
pub const SOUTH: u8 = 0b0100;
pub const WEST: u8 = 0b1000;

/// One-hot selectors over rotation *turn count*, not cardinal direction.
/// Numerically identical to the `NORTH`/`EAST`/`SOUTH`/`WEST` shape-domain
/// bits (both are 4-bit position masks), but kept separately named so that
/// "rotate by this many quarter-turns" is never confused with "this cardinal
/// direction's stub bit" at a call site.
const TURN0: u8 = 1 << 0;
const TURN1: u8 = 1 << 1;
const TURN2: u8 = 1 << 2;
const TURN3: u8 = 1 << 3;

/// No connection stubs.
pub const EMPTY: ShapeCode = 0x0;
/// A single stub.
pub const DEAD_END: ShapeCode = 0x1;
/// Two adjacent stubs.
pub const CORNER: ShapeCode = 0x3;
/// Two opposite stubs.
pub const STRAIGHT: ShapeCode = 0x5;
/// Three stubs.
pub const T_JUNCTION: ShapeCode = 0x7;
/// All four stubs.
pub const CROSS: ShapeCode = 0xf;

/// All options are open: every quarter-turn is still a candidate.
pub const ALL_ORIENTATIONS: OptionsMask = 0xf;
/// A single remaining orientation (rotation 0).
pub const FIXED: OptionsMask = 0x1;

/// Rotates `shape` clockwise by the quarter-turns selected by the one-hot
/// mask `selector` (i.e. `selector == 1 << i` rotates by `i` turns).
///
/// `selector == 0` returns 0, matching the fanout use where missing bits
/// contribute nothing to the union.
///
/// Identity: multiplying a 4-bit value by a one-hot selector lifts its bits
/// by the selector's shift amount; OR-ing the high nibble back down wraps
/// the overflow into the low nibble, which is exactly a cyclic rotation.
#[inline(always)]
pub const fn rotate(shape: ShapeCode, selector: u8) -> ShapeCode {
    let lifted = (shape as u16) * (selector as u16);
    ((lifted | (lifted >> 4)) & 0xf) as u8
}

/// Rotates a shape by one quarter-turn clockwise.
#[inline(always)]
pub const fn rotate_cw(shape: ShapeCode) -> ShapeCode {
    rotate(shape, 1 << 1)
}

/// Rotates a shape by two quarter-turns (upside-down / opposite perspective).
#[inline(always)]
pub const fn rotate2(shape: ShapeCode) -> ShapeCode {
    ((shape << 2) | (shape >> 2)) & 0xf
}

/// The union of stub patterns reachable under every rotation still allowed
/// by `options`.
///
/// Equivalent to `rotate(shape, options&1) | rotate(shape, options&2) |
/// rotate(shape, options&4) | rotate(shape, options&8)`, fused into one
/// expression by multiplying once and distributing the mask afterwards.
#[inline(always)]
pub const fn fanout(shape: ShapeCode, options: OptionsMask) -> ShapeCode {
    rotate(shape, options & TURN0)
        | rotate(shape, options & TURN1)
        | rotate(shape, options & TURN2)
        | rotate(shape, options & TURN3)
}

/// Classifies a shape's rotational symmetry and returns its initial options
/// mask: the full set of rotations that produce a distinct configuration.
///
/// Empty and cross are invariant under a single quarter-turn (options = 0x1);
/// straight is invariant only under a half-turn (options = 0x3); every other
/// shape has four distinct orientations (options = 0xf). The dead-end shape
/// falls into that last bucket even though a cheaper bit trick can detect it
/// specially (see DESIGN.md) — it is not narrowed further here.
#[inline]
pub const fn initial_options(shape: ShapeCode) -> OptionsMask {
    if rotate_cw(shape) == shape {
        FIXED
    } else if rotate2(shape) == shape {
        TURN0 | TURN1
    } else {
        ALL_ORIENTATIONS
    }
}

/// Number of orientation bits set in an options mask.
#[inline(always)]
pub const fn popcount(options: OptionsMask) -> u32 {
    (options & 0xf).count_ones()
}
