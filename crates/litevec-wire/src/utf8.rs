//! Whole-slice UTF-8 validation via a byte-class DFA.
//!
//! UTF-8 DFA by Bjoern Hoehrmann <bjoern@hoehrmann.de>, MIT licensed.
//! See <http://bjoern.hoehrmann.de/utf-8/decoder/dfa/> for details.

const ACCEPT: u8 = 0;

/// The first 256 entries map each byte to a character class; the remaining
/// entries are the transition table, indexed by `256 + state + class`.
/// States are multiples of 12; state 12 is the single rejecting trap.
#[rustfmt::skip]
static UTF8_DFA: [u8; 364] = [
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,  0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,
    1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,1,  9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,9,
    7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,  7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,7,
    8,8,2,2,2,2,2,2,2,2,2,2,2,2,2,2,  2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,2,
    10,3,3,3,3,3,3,3,3,3,3,3,3,4,3,3, 11,6,6,6,5,8,8,8,8,8,8,8,8,8,8,8,

    0,12,24,36,60,96,84,12,12,12,48,72, 12,12,12,12,12,12,12,12,12,12,12,12,
    12, 0,12,12,12,12,12, 0,12, 0,12,12, 12,24,12,12,12,12,12,24,12,24,12,12,
    12,12,12,12,12,12,12,24,12,12,12,12, 12,24,12,12,12,12,12,12,12,24,12,12,
    12,12,12,12,12,12,12,36,12,36,12,12, 12,36,12,12,12,12,12,36,12,36,12,12,
    12,36,12,12,12,12,12,12,12,12,12,12,
];

/// Check whether an entire byte slice is well-formed UTF-8.
///
/// Runs the automaton over every byte; rejection anywhere (including a
/// truncated trailing sequence) leaves the machine outside the accepting
/// state.
#[must_use]
pub fn is_valid_utf8(buf: &[u8]) -> bool {
    let mut state = ACCEPT;
    for &byte in buf {
        let class = UTF8_DFA[usize::from(byte)];
        state = UTF8_DFA[256 + usize::from(state) + usize::from(class)];
    }
    state == ACCEPT
}
