use super::addressing_mode::AddressingMode;
use super::error::Error;
use super::opcode::Opcode;

/// A raw opcode byte resolved to the instruction it selects.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct DecodedOpcode {
    pub opcode: Opcode,
    pub mode: AddressingMode,
    pub length: u16,
    pub cycles: u32,
}

impl DecodedOpcode {
    const fn new(opcode: Opcode, mode: AddressingMode, cycles: u32) -> DecodedOpcode {
        DecodedOpcode {
            opcode,
            mode,
            length: mode.instruction_length(),
            cycles,
        }
    }
}

/// Decode a raw opcode byte. Only the 151 standard 6502 opcodes are recognised;
/// undocumented/illegal opcodes are out of scope and decode to `UnknownOpcode`.
pub fn decode(raw: u8) -> Result<DecodedOpcode, Error> {
    OPCODE_TABLE[raw as usize].ok_or(Error::UnknownOpcode(raw))
}

use AddressingMode::*;
use Opcode::*;

static OPCODE_TABLE: [Option<DecodedOpcode>; 256] = {
    const fn d(opcode: Opcode, mode: AddressingMode, cycles: u32) -> Option<DecodedOpcode> {
        Some(DecodedOpcode::new(opcode, mode, cycles))
    }

    [
        /*0x00*/ d(BRK, Implied, 7),
        /*0x01*/ d(ORA, IndexedIndirect, 6),
        /*0x02*/ None,
        /*0x03*/ None,
        /*0x04*/ None,
        /*0x05*/ d(ORA, ZeroPage, 3),
        /*0x06*/ d(ASL, ZeroPage, 5),
        /*0x07*/ None,
        /*0x08*/ d(PHP, Implied, 3),
        /*0x09*/ d(ORA, Immediate, 2),
        /*0x0A*/ d(ASL, Accumulator, 2),
        /*0x0B*/ None,
        /*0x0C*/ None,
        /*0x0D*/ d(ORA, Absolute, 4),
        /*0x0E*/ d(ASL, Absolute, 6),
        /*0x0F*/ None,
        /*0x10*/ d(BPL, Relative, 2),
        /*0x11*/ d(ORA, IndirectIndexed, 5),
        /*0x12*/ None,
        /*0x13*/ None,
        /*0x14*/ None,
        /*0x15*/ d(ORA, ZeroPageX, 4),
        /*0x16*/ d(ASL, ZeroPageX, 6),
        /*0x17*/ None,
        /*0x18*/ d(CLC, Implied, 2),
        /*0x19*/ d(ORA, AbsoluteY, 4),
        /*0x1A*/ None,
        /*0x1B*/ None,
        /*0x1C*/ None,
        /*0x1D*/ d(ORA, AbsoluteX, 4),
        /*0x1E*/ d(ASL, AbsoluteX, 7),
        /*0x1F*/ None,
        /*0x20*/ d(JSR, Absolute, 6),
        /*0x21*/ d(AND, IndexedIndirect, 6),
        /*0x22*/ None,
        /*0x23*/ None,
        /*0x24*/ d(BIT, ZeroPage, 3),
        /*0x25*/ d(AND, ZeroPage, 3),
        /*0x26*/ d(ROL, ZeroPage, 5),
        /*0x27*/ None,
        /*0x28*/ d(PLP, Implied, 4),
        /*0x29*/ d(AND, Immediate, 2),
        /*0x2A*/ d(ROL, Accumulator, 2),
        /*0x2B*/ None,
        /*0x2C*/ d(BIT, Absolute, 4),
        /*0x2D*/ d(AND, Absolute, 4),
        /*0x2E*/ d(ROL, Absolute, 6),
        /*0x2F*/ None,
        /*0x30*/ d(BMI, Relative, 2),
        /*0x31*/ d(AND, IndirectIndexed, 5),
        /*0x32*/ None,
        /*0x33*/ None,
        /*0x34*/ None,
        /*0x35*/ d(AND, ZeroPageX, 4),
        /*0x36*/ d(ROL, ZeroPageX, 6),
        /*0x37*/ None,
        /*0x38*/ d(SEC, Implied, 2),
        /*0x39*/ d(AND, AbsoluteY, 4),
        /*0x3A*/ None,
        /*0x3B*/ None,
        /*0x3C*/ None,
        /*0x3D*/ d(AND, AbsoluteX, 4),
        /*0x3E*/ d(ROL, AbsoluteX, 7),
        /*0x3F*/ None,
        /*0x40*/ d(RTI, Implied, 6),
        /*0x41*/ d(EOR, IndexedIndirect, 6),
        /*0x42*/ None,
        /*0x43*/ None,
        /*0x44*/ None,
        /*0x45*/ d(EOR, ZeroPage, 3),
        /*0x46*/ d(LSR, ZeroPage, 5),
        /*0x47*/ None,
        /*0x48*/ d(PHA, Implied, 3),
        /*0x49*/ d(EOR, Immediate, 2),
        /*0x4A*/ d(LSR, Accumulator, 2),
        /*0x4B*/ None,
        /*0x4C*/ d(JMP, Absolute, 3),
        /*0x4D*/ d(EOR, Absolute, 4),
        /*0x4E*/ d(LSR, Absolute, 6),
        /*0x4F*/ None,
        /*0x50*/ d(BVC, Relative, 2),
        /*0x51*/ d(EOR, IndirectIndexed, 5),
        /*0x52*/ None,
        /*0x53*/ None,
        /*0x54*/ None,
        /*0x55*/ d(EOR, ZeroPageX, 4),
        /*0x56*/ d(LSR, ZeroPageX, 6),
        /*0x57*/ None,
        /*0x58*/ d(CLI, Implied, 2),
        /*0x59*/ d(EOR, AbsoluteY, 4),
        /*0x5A*/ None,
        /*0x5B*/ None,
        /*0x5C*/ None,
        /*0x5D*/ d(EOR, AbsoluteX, 4),
        /*0x5E*/ d(LSR, AbsoluteX, 7),
        /*0x5F*/ None,
        /*0x60*/ d(RTS, Implied, 6),
        /*0x61*/ d(ADC, IndexedIndirect, 6),
        /*0x62*/ None,
        /*0x63*/ None,
        /*0x64*/ None,
        /*0x65*/ d(ADC, ZeroPage, 3),
        /*0x66*/ d(ROR, ZeroPage, 5),
        /*0x67*/ None,
        /*0x68*/ d(PLA, Implied, 4),
        /*0x69*/ d(ADC, Immediate, 2),
        /*0x6A*/ d(ROR, Accumulator, 2),
        /*0x6B*/ None,
        /*0x6C*/ d(JMP, Indirect, 5),
        /*0x6D*/ d(ADC, Absolute, 4),
        /*0x6E*/ d(ROR, Absolute, 6),
        /*0x6F*/ None,
        /*0x70*/ d(BVS, Relative, 2),
        /*0x71*/ d(ADC, IndirectIndexed, 5),
        /*0x72*/ None,
        /*0x73*/ None,
        /*0x74*/ None,
        /*0x75*/ d(ADC, ZeroPageX, 4),
        /*0x76*/ d(ROR, ZeroPageX, 6),
        /*0x77*/ None,
        /*0x78*/ d(SEI, Implied, 2),
        /*0x79*/ d(ADC, AbsoluteY, 4),
        /*0x7A*/ None,
        /*0x7B*/ None,
        /*0x7C*/ None,
        /*0x7D*/ d(ADC, AbsoluteX, 4),
        /*0x7E*/ d(ROR, AbsoluteX, 7),
        /*0x7F*/ None,
        /*0x80*/ None,
        /*0x81*/ d(STA, IndexedIndirect, 6),
        /*0x82*/ None,
        /*0x83*/ None,
        /*0x84*/ d(STY, ZeroPage, 3),
        /*0x85*/ d(STA, ZeroPage, 3),
        /*0x86*/ d(STX, ZeroPage, 3),
        /*0x87*/ None,
        /*0x88*/ d(DEY, Implied, 2),
        /*0x89*/ None,
        /*0x8A*/ d(TXA, Implied, 2),
        /*0x8B*/ None,
        /*0x8C*/ d(STY, Absolute, 4),
        /*0x8D*/ d(STA, Absolute, 4),
        /*0x8E*/ d(STX, Absolute, 4),
        /*0x8F*/ None,
        /*0x90*/ d(BCC, Relative, 2),
        /*0x91*/ d(STA, IndirectIndexed, 6),
        /*0x92*/ None,
        /*0x93*/ None,
        /*0x94*/ d(STY, ZeroPageX, 4),
        /*0x95*/ d(STA, ZeroPageX, 4),
        /*0x96*/ d(STX, ZeroPageY, 4),
        /*0x97*/ None,
        /*0x98*/ d(TYA, Implied, 2),
        /*0x99*/ d(STA, AbsoluteY, 5),
        /*0x9A*/ d(TXS, Implied, 2),
        /*0x9B*/ None,
        /*0x9C*/ None,
        /*0x9D*/ d(STA, AbsoluteX, 5),
        /*0x9E*/ None,
        /*0x9F*/ None,
        /*0xA0*/ d(LDY, Immediate, 2),
        /*0xA1*/ d(LDA, IndexedIndirect, 6),
        /*0xA2*/ d(LDX, Immediate, 2),
        /*0xA3*/ None,
        /*0xA4*/ d(LDY, ZeroPage, 3),
        /*0xA5*/ d(LDA, ZeroPage, 3),
        /*0xA6*/ d(LDX, ZeroPage, 3),
        /*0xA7*/ None,
        /*0xA8*/ d(TAY, Implied, 2),
        /*0xA9*/ d(LDA, Immediate, 2),
        /*0xAA*/ d(TAX, Implied, 2),
        /*0xAB*/ None,
        /*0xAC*/ d(LDY, Absolute, 4),
        /*0xAD*/ d(LDA, Absolute, 4),
        /*0xAE*/ d(LDX, Absolute, 4),
        /*0xAF*/ None,
        /*0xB0*/ d(BCS, Relative, 2),
        /*0xB1*/ d(LDA, IndirectIndexed, 5),
        /*0xB2*/ None,
        /*0xB3*/ None,
        /*0xB4*/ d(LDY, ZeroPageX, 4),
        /*0xB5*/ d(LDA, ZeroPageX, 4),
        /*0xB6*/ d(LDX, ZeroPageY, 4),
        /*0xB7*/ None,
        /*0xB8*/ d(CLV, Implied, 2),
        /*0xB9*/ d(LDA, AbsoluteY, 4),
        /*0xBA*/ d(TSX, Implied, 2),
        /*0xBB*/ None,
        /*0xBC*/ d(LDY, AbsoluteX, 4),
        /*0xBD*/ d(LDA, AbsoluteX, 4),
        /*0xBE*/ d(LDX, AbsoluteY, 4),
        /*0xBF*/ None,
        /*0xC0*/ d(CPY, Immediate, 2),
        /*0xC1*/ d(CMP, IndexedIndirect, 6),
        /*0xC2*/ None,
        /*0xC3*/ None,
        /*0xC4*/ d(CPY, ZeroPage, 3),
        /*0xC5*/ d(CMP, ZeroPage, 3),
        /*0xC6*/ d(DEC, ZeroPage, 5),
        /*0xC7*/ None,
        /*0xC8*/ d(INY, Implied, 2),
        /*0xC9*/ d(CMP, Immediate, 2),
        /*0xCA*/ d(DEX, Implied, 2),
        /*0xCB*/ None,
        /*0xCC*/ d(CPY, Absolute, 4),
        /*0xCD*/ d(CMP, Absolute, 4),
        /*0xCE*/ d(DEC, Absolute, 6),
        /*0xCF*/ None,
        /*0xD0*/ d(BNE, Relative, 2),
        /*0xD1*/ d(CMP, IndirectIndexed, 5),
        /*0xD2*/ None,
        /*0xD3*/ None,
        /*0xD4*/ None,
        /*0xD5*/ d(CMP, ZeroPageX, 4),
        /*0xD6*/ d(DEC, ZeroPageX, 6),
        /*0xD7*/ None,
        /*0xD8*/ d(CLD, Implied, 2),
        /*0xD9*/ d(CMP, AbsoluteY, 4),
        /*0xDA*/ None,
        /*0xDB*/ None,
        /*0xDC*/ None,
        /*0xDD*/ d(CMP, AbsoluteX, 4),
        /*0xDE*/ d(DEC, AbsoluteX, 7),
        /*0xDF*/ None,
        /*0xE0*/ d(CPX, Immediate, 2),
        /*0xE1*/ d(SBC, IndexedIndirect, 6),
        /*0xE2*/ None,
        /*0xE3*/ None,
        /*0xE4*/ d(CPX, ZeroPage, 3),
        /*0xE5*/ d(SBC, ZeroPage, 3),
        /*0xE6*/ d(INC, ZeroPage, 5),
        /*0xE7*/ None,
        /*0xE8*/ d(INX, Implied, 2),
        /*0xE9*/ d(SBC, Immediate, 2),
        /*0xEA*/ d(NOP, Implied, 2),
        /*0xEB*/ None,
        /*0xEC*/ d(CPX, Absolute, 4),
        /*0xED*/ d(SBC, Absolute, 4),
        /*0xEE*/ d(INC, Absolute, 6),
        /*0xEF*/ None,
        /*0xF0*/ d(BEQ, Relative, 2),
        /*0xF1*/ d(SBC, IndirectIndexed, 5),
        /*0xF2*/ None,
        /*0xF3*/ None,
        /*0xF4*/ None,
        /*0xF5*/ d(SBC, ZeroPageX, 4),
        /*0xF6*/ d(INC, ZeroPageX, 6),
        /*0xF7*/ None,
        /*0xF8*/ d(SED, Implied, 2),
        /*0xF9*/ d(SBC, AbsoluteY, 4),
        /*0xFA*/ None,
        /*0xFB*/ None,
        /*0xFC*/ None,
        /*0xFD*/ d(SBC, AbsoluteX, 4),
        /*0xFE*/ d(INC, AbsoluteX, 7),
        /*0xFF*/ None,
    ]
};

#[cfg(test)]
mod tests {
    use super::*;

    /// The table must define exactly the 151 documented 6502 opcodes.
    #[test]
    pub fn defines_exactly_151_opcodes() {
        let defined = OPCODE_TABLE.iter().filter(|entry| entry.is_some()).count();
        assert_eq!(defined, 151);
    }

    #[test]
    pub fn length_follows_addressing_mode() {
        let lda_absolute = decode(0xAD).unwrap();
        assert_eq!(lda_absolute.length, 3);

        let nop_implied = decode(0xEA).unwrap();
        assert_eq!(nop_implied.length, 1);
    }

    #[test]
    pub fn unassigned_byte_is_unknown_opcode() {
        assert_eq!(decode(0x02), Err(Error::UnknownOpcode(0x02)));
    }
}
