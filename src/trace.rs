use emunes_mos6502::{AddressingMode, Opcode, StepTrace};

/// Render one executed instruction as a line in the canonical nestest disassembly trace
/// format. Only the columns nestest itself defines are produced — PPU dot/scanline and
/// cycle counters aren't, since neither the PPU nor cycle pacing is emulated.
pub fn format_line(trace: &StepTrace) -> String {
    let bytes = format_bytes(&trace.raw_bytes);
    let disassembly = format_disassembly(trace);

    format!(
        "{:04X}  {:<8}  {:<31} A:{:02X} X:{:02X} Y:{:02X} P:{:02X} SP:{:02X}",
        trace.pc, bytes, disassembly, trace.a, trace.x, trace.y, trace.p, trace.sp
    )
}

fn format_bytes(raw_bytes: &[u8]) -> String {
    raw_bytes.iter().map(|b| format!("{:02X}", b)).collect::<Vec<_>>().join(" ")
}

fn format_disassembly(trace: &StepTrace) -> String {
    let mnemonic = trace.opcode.mnemonic();
    let operand = format_operand(trace);

    if operand.is_empty() {
        mnemonic.to_string()
    } else {
        format!("{} {}", mnemonic, operand)
    }
}

fn format_operand(trace: &StepTrace) -> String {
    let is_jump = matches!(trace.opcode, Opcode::JMP | Opcode::JSR);

    match trace.mode {
        AddressingMode::Implied => String::new(),
        AddressingMode::Accumulator => "A".to_string(),
        AddressingMode::Immediate => format!("#${:02X}", trace.operand_low.unwrap_or(0)),

        AddressingMode::ZeroPage => format!("${:02X} = {:02X}", trace.operand_low.unwrap_or(0), trace.value.unwrap_or(0)),

        AddressingMode::ZeroPageX => format!(
            "${:02X},X @ {:02X} = {:02X}",
            trace.operand_low.unwrap_or(0),
            trace.effective_address.unwrap_or(0),
            trace.value.unwrap_or(0)
        ),

        AddressingMode::ZeroPageY => format!(
            "${:02X},Y @ {:02X} = {:02X}",
            trace.operand_low.unwrap_or(0),
            trace.effective_address.unwrap_or(0),
            trace.value.unwrap_or(0)
        ),

        AddressingMode::Relative => format!("${:04X}", trace.effective_address.unwrap_or(0)),

        AddressingMode::Absolute if is_jump => format!("${:04X}", trace.effective_address.unwrap_or(0)),
        AddressingMode::Absolute => format!(
            "${:04X} = {:02X}",
            trace.effective_address.unwrap_or(0),
            trace.value.unwrap_or(0)
        ),

        AddressingMode::AbsoluteX => format!(
            "${:02X}{:02X},X @ {:04X} = {:02X}",
            trace.operand_high.unwrap_or(0),
            trace.operand_low.unwrap_or(0),
            trace.effective_address.unwrap_or(0),
            trace.value.unwrap_or(0)
        ),

        AddressingMode::AbsoluteY => format!(
            "${:02X}{:02X},Y @ {:04X} = {:02X}",
            trace.operand_high.unwrap_or(0),
            trace.operand_low.unwrap_or(0),
            trace.effective_address.unwrap_or(0),
            trace.value.unwrap_or(0)
        ),

        AddressingMode::Indirect => format!(
            "(${:04X}) = {:04X}",
            trace.pointer.unwrap_or(0),
            trace.effective_address.unwrap_or(0)
        ),

        AddressingMode::IndexedIndirect => format!(
            "(${:02X},X) @ {:02X} = {:04X} = {:02X}",
            trace.operand_low.unwrap_or(0),
            trace.pointer.unwrap_or(0),
            trace.effective_address.unwrap_or(0),
            trace.value.unwrap_or(0)
        ),

        AddressingMode::IndirectIndexed => format!(
            "(${:02X}),Y = {:04X} @ {:04X} = {:02X}",
            trace.operand_low.unwrap_or(0),
            trace.pointer.unwrap_or(0),
            trace.effective_address.unwrap_or(0),
            trace.value.unwrap_or(0)
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_trace() -> StepTrace {
        StepTrace {
            pc: 0xC000,
            raw_bytes: vec![0x4C, 0xF5, 0xC5],
            opcode: Opcode::JMP,
            mode: AddressingMode::Absolute,
            operand_low: Some(0xF5),
            operand_high: Some(0xC5),
            pointer: None,
            effective_address: Some(0xC5F5),
            value: None,
            a: 0,
            x: 0,
            y: 0,
            p: 0x24,
            sp: 0xFD,
        }
    }

    #[test]
    pub fn jmp_absolute_has_no_trailing_value() {
        let line = format_line(&base_trace());

        assert!(line.starts_with("C000  4C F5 C5  JMP $C5F5"));
        assert!(line.contains("A:00 X:00 Y:00 P:24 SP:FD"));
    }

    #[test]
    pub fn immediate_operand_is_hash_prefixed() {
        let mut trace = base_trace();
        trace.raw_bytes = vec![0xA9, 0x05];
        trace.opcode = Opcode::LDA;
        trace.mode = AddressingMode::Immediate;
        trace.operand_low = Some(0x05);
        trace.operand_high = None;
        trace.effective_address = None;

        let line = format_line(&trace);

        assert!(line.contains("LDA #$05"));
    }

    #[test]
    pub fn zero_page_shows_address_and_value() {
        let mut trace = base_trace();
        trace.opcode = Opcode::STX;
        trace.mode = AddressingMode::ZeroPage;
        trace.operand_low = Some(0x10);
        trace.operand_high = None;
        trace.effective_address = Some(0x10);
        trace.value = Some(0x00);

        let line = format_line(&trace);

        assert!(line.contains("STX $10 = 00"));
    }
}
