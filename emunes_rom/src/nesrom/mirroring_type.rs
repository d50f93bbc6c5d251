#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum MirroringType {
    Horizontal,
    Vertical,
    FourScreen,
}

impl MirroringType {
    pub fn from_ines_byte_6(byte: u8) -> MirroringType {
        let mirror_bit = byte & 0b0000_0001 != 0;
        let four_screen_bit = byte & 0b0000_1000 != 0;

        match (mirror_bit, four_screen_bit) {
            (_, true) => MirroringType::FourScreen,
            (false, _) => MirroringType::Horizontal,
            (true, _) => MirroringType::Vertical,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    pub fn four_screen_bit_wins_regardless_of_mirror_bit() {
        assert_eq!(MirroringType::from_ines_byte_6(0b0000_1001), MirroringType::FourScreen);
        assert_eq!(MirroringType::from_ines_byte_6(0b0000_1000), MirroringType::FourScreen);
    }

    #[test]
    pub fn mirror_bit_selects_horizontal_or_vertical() {
        assert_eq!(MirroringType::from_ines_byte_6(0b0000_0000), MirroringType::Horizontal);
        assert_eq!(MirroringType::from_ines_byte_6(0b0000_0001), MirroringType::Vertical);
    }
}
