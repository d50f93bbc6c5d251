/// `Status` represents the processor status register, `p` on the `Cpu`.
///
/// ```text
/// +---+---+---+---+---+---+---+---+
/// | N | V |   | B | D | I | Z | C |
/// +---+---+---+---+---+---+---+---+
/// ```
///
/// - `C` carry, the "ninth bit" for arithmetic and shifts.
/// - `Z` set when the result of the last operation was zero.
/// - `I` interrupt disable.
/// - `D` decimal mode. Stored but never consulted by arithmetic on this CPU.
/// - `B` break. Only meaningful in the copy of `P` pushed to the stack.
/// - ` ` unused, always observed as `1`.
/// - `V` signed overflow.
/// - `N` set when the result of the last operation has bit 7 set.
#[derive(Eq, PartialEq, Clone, Copy, Debug)]
pub struct Status(pub u8);

impl Status {
    pub fn get(&self, flag: StatusFlag) -> bool {
        self.0 & (1 << flag as u8) != 0
    }

    pub fn set(&mut self, flag: StatusFlag, value: bool) {
        let bit = 1 << flag as u8;
        if value {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }
}

impl Default for Status {
    /// The reset value of `P`: `Unused` and `InterruptDisable` set, everything else clear.
    fn default() -> Status {
        Status(0b0010_0100)
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum StatusFlag {
    Carry = 0,
    Zero = 1,
    InterruptDisable = 2,
    DecimalMode = 3,
    Break = 4,
    Unused = 5,
    Overflow = 6,
    Negative = 7,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn default_matches_reset_value() {
        assert_eq!(Status::default().0, 0x24);
    }

    #[test]
    pub fn set_then_get_round_trips() {
        let mut status = Status(0);
        status.set(StatusFlag::Carry, true);
        status.set(StatusFlag::Negative, true);

        assert!(status.get(StatusFlag::Carry));
        assert!(status.get(StatusFlag::Negative));
        assert!(!status.get(StatusFlag::Zero));
    }
}
