pub mod addressing_mode;
pub mod bus;
pub mod decode;
pub mod error;
mod resolve;
pub mod status;
pub mod trace;

pub mod opcode;

use addressing_mode::AddressingMode;
use bus::Bus;
use decode::decode;
use error::Error;
use opcode::Opcode;
use resolve::{resolve, Resolved};
use status::{Status, StatusFlag};
use trace::StepTrace;

pub type Result<A> = std::result::Result<A, Error>;

pub const RESET_VECTOR_ADDRESS: u16 = 0xFFFC;
pub const IRQ_VECTOR_ADDRESS: u16 = 0xFFFE;

const STACK_PAGE: u16 = 0x0100;

/// `Cpu` emulates the MOS Technology 6502 as used in the Ricoh 2A03 (no decimal mode).
///
/// Unlike a cycle-accurate core, `Cpu` decodes and executes one instruction per `step`
/// call with no per-cycle pacing; the base cycle count of each opcode is carried on
/// `DecodedOpcode` but never consumed here.
#[derive(Debug)]
pub struct Cpu {
    pub a: u8,
    pub x: u8,
    pub y: u8,
    pub p: Status,
    pub pc: u16,
    pub sp: u8,

    reset_vector_override: Option<u16>,
}

impl Cpu {
    pub fn new() -> Cpu {
        Cpu {
            a: 0,
            x: 0,
            y: 0,
            p: Status::default(),
            pc: 0,
            sp: 0,
            reset_vector_override: None,
        }
    }

    /// Override the address loaded into `pc` on reset instead of reading it from the bus.
    /// Used by the nestest conformance harness, which starts execution at `$C000`.
    pub fn with_reset_vector_override(mut self, address: u16) -> Cpu {
        self.reset_vector_override = Some(address);
        self
    }

    /// Simulate the `reset` input of the 6502.
    pub fn reset(&mut self, bus: &impl Bus) {
        self.a = 0;
        self.x = 0;
        self.y = 0;
        self.p = Status::default();
        self.sp = 0xFD;
        self.pc = self
            .reset_vector_override
            .unwrap_or_else(|| bus.read_u16(RESET_VECTOR_ADDRESS));
    }

    /// Fetch, decode, resolve and execute the instruction at `pc`, returning a snapshot
    /// of what happened for the trace emitter.
    pub fn step(&mut self, bus: &mut impl Bus) -> Result<StepTrace> {
        let instruction_pc = self.pc;
        let raw = bus.read_u8(instruction_pc);
        let decoded = decode(raw)?;

        let b1 = if decoded.length >= 2 {
            bus.read_u8(instruction_pc.wrapping_add(1))
        } else {
            0
        };
        let b2 = if decoded.length >= 3 {
            bus.read_u8(instruction_pc.wrapping_add(2))
        } else {
            0
        };

        let resolved = resolve(self, bus, decoded.mode, instruction_pc, b1, b2);

        let trace_value = trace_peek_value(bus, decoded.opcode, decoded.mode, &resolved);

        let trace = StepTrace {
            pc: instruction_pc,
            raw_bytes: raw_bytes(raw, decoded.length, b1, b2),
            opcode: decoded.opcode,
            mode: decoded.mode,
            operand_low: (decoded.length >= 2).then_some(b1),
            operand_high: (decoded.length >= 3).then_some(b2),
            pointer: resolved.pointer,
            effective_address: resolved.address,
            value: trace_value,
            a: self.a,
            x: self.x,
            y: self.y,
            p: self.p.0,
            sp: self.sp,
        };

        let next_pc = instruction_pc.wrapping_add(decoded.length);
        self.pc = next_pc;

        self.execute(bus, decoded.opcode, resolved, instruction_pc, next_pc)?;

        Ok(trace)
    }

    /// Run until `step_budget` instructions have executed (or forever if `None`), stopping
    /// immediately if decoding fails. Returns the trace of every instruction executed.
    pub fn run(&mut self, bus: &mut impl Bus, step_budget: Option<u64>) -> Result<Vec<StepTrace>> {
        let mut trace = Vec::new();
        let mut executed: u64 = 0;

        loop {
            if let Some(budget) = step_budget {
                if executed >= budget {
                    break;
                }
            }

            trace.push(self.step(bus)?);
            executed += 1;
        }

        Ok(trace)
    }

    fn execute(
        &mut self,
        bus: &mut impl Bus,
        opcode: Opcode,
        resolved: Resolved,
        instruction_pc: u16,
        next_pc: u16,
    ) -> Result<()> {
        match opcode {
            Opcode::LDA => self.op_load_a(bus, resolved),
            Opcode::LDX => self.op_load_x(bus, resolved),
            Opcode::LDY => self.op_load_y(bus, resolved),
            Opcode::STA => self.op_store(bus, resolved, self.a),
            Opcode::STX => self.op_store(bus, resolved, self.x),
            Opcode::STY => self.op_store(bus, resolved, self.y),
            Opcode::TAX => self.transfer(self.a, |cpu, v| cpu.x = v),
            Opcode::TAY => self.transfer(self.a, |cpu, v| cpu.y = v),
            Opcode::TXA => self.transfer(self.x, |cpu, v| cpu.a = v),
            Opcode::TYA => self.transfer(self.y, |cpu, v| cpu.a = v),
            Opcode::TSX => self.transfer(self.sp, |cpu, v| cpu.x = v),
            Opcode::TXS => {
                self.sp = self.x;
                Ok(())
            }

            Opcode::PHA => {
                self.push_u8(bus, self.a);
                Ok(())
            }
            Opcode::PHP => {
                let mut pushed = self.p;
                pushed.set(StatusFlag::Break, true);
                pushed.set(StatusFlag::Unused, true);
                self.push_u8(bus, pushed.0);
                Ok(())
            }
            Opcode::PLA => {
                let value = self.pull_u8(bus);
                self.a = value;
                self.set_nz(value);
                Ok(())
            }
            Opcode::PLP => {
                let value = self.pull_u8(bus);
                self.load_status(value);
                Ok(())
            }

            Opcode::AND => self.op_logical(bus, resolved, |a, v| a & v),
            Opcode::EOR => self.op_logical(bus, resolved, |a, v| a ^ v),
            Opcode::ORA => self.op_logical(bus, resolved, |a, v| a | v),
            Opcode::BIT => self.op_bit(bus, resolved),

            Opcode::ADC => {
                let value = resolved.read(self, bus);
                self.add_with_carry(value);
                Ok(())
            }
            Opcode::SBC => {
                let value = resolved.read(self, bus);
                self.add_with_carry(!value);
                Ok(())
            }
            Opcode::CMP => self.op_compare(bus, resolved, self.a),
            Opcode::CPX => self.op_compare(bus, resolved, self.x),
            Opcode::CPY => self.op_compare(bus, resolved, self.y),

            Opcode::INC => self.op_modify_memory(bus, resolved, |v| v.wrapping_add(1)),
            Opcode::INX => {
                self.x = self.x.wrapping_add(1);
                self.set_nz(self.x);
                Ok(())
            }
            Opcode::INY => {
                self.y = self.y.wrapping_add(1);
                self.set_nz(self.y);
                Ok(())
            }
            Opcode::DEC => self.op_modify_memory(bus, resolved, |v| v.wrapping_sub(1)),
            Opcode::DEX => {
                self.x = self.x.wrapping_sub(1);
                self.set_nz(self.x);
                Ok(())
            }
            Opcode::DEY => {
                self.y = self.y.wrapping_sub(1);
                self.set_nz(self.y);
                Ok(())
            }

            Opcode::ASL => self.op_shift(bus, resolved, |v| (v.wrapping_shl(1), v & 0x80 != 0)),
            Opcode::LSR => self.op_shift(bus, resolved, |v| (v.wrapping_shr(1), v & 0x01 != 0)),
            Opcode::ROL => {
                let carry_in = self.p.get(StatusFlag::Carry) as u8;
                self.op_shift(bus, resolved, |v| ((v.wrapping_shl(1)) | carry_in, v & 0x80 != 0))
            }
            Opcode::ROR => {
                let carry_in = (self.p.get(StatusFlag::Carry) as u8) << 7;
                self.op_shift(bus, resolved, |v| ((v.wrapping_shr(1)) | carry_in, v & 0x01 != 0))
            }

            Opcode::JMP => {
                self.pc = resolved.address.expect("JMP always resolves to an address");
                Ok(())
            }
            Opcode::JSR => {
                let return_address = next_pc.wrapping_sub(1);
                self.push_u16(bus, return_address);
                self.pc = resolved.address.expect("JSR always resolves to an address");
                Ok(())
            }
            Opcode::RTS => {
                let address = self.pull_u16(bus);
                self.pc = address.wrapping_add(1);
                Ok(())
            }

            Opcode::BCC => self.branch(resolved, !self.p.get(StatusFlag::Carry), next_pc),
            Opcode::BCS => self.branch(resolved, self.p.get(StatusFlag::Carry), next_pc),
            Opcode::BEQ => self.branch(resolved, self.p.get(StatusFlag::Zero), next_pc),
            Opcode::BNE => self.branch(resolved, !self.p.get(StatusFlag::Zero), next_pc),
            Opcode::BMI => self.branch(resolved, self.p.get(StatusFlag::Negative), next_pc),
            Opcode::BPL => self.branch(resolved, !self.p.get(StatusFlag::Negative), next_pc),
            Opcode::BVC => self.branch(resolved, !self.p.get(StatusFlag::Overflow), next_pc),
            Opcode::BVS => self.branch(resolved, self.p.get(StatusFlag::Overflow), next_pc),

            Opcode::CLC => {
                self.p.set(StatusFlag::Carry, false);
                Ok(())
            }
            Opcode::CLD => {
                self.p.set(StatusFlag::DecimalMode, false);
                Ok(())
            }
            Opcode::CLI => {
                self.p.set(StatusFlag::InterruptDisable, false);
                Ok(())
            }
            Opcode::CLV => {
                self.p.set(StatusFlag::Overflow, false);
                Ok(())
            }
            Opcode::SEC => {
                self.p.set(StatusFlag::Carry, true);
                Ok(())
            }
            Opcode::SED => {
                self.p.set(StatusFlag::DecimalMode, true);
                Ok(())
            }
            Opcode::SEI => {
                self.p.set(StatusFlag::InterruptDisable, true);
                Ok(())
            }

            Opcode::NOP => Ok(()),
            Opcode::BRK => {
                let pushed_pc = instruction_pc.wrapping_add(2);
                self.push_u16(bus, pushed_pc);
                let mut pushed_status = self.p;
                pushed_status.set(StatusFlag::Break, true);
                pushed_status.set(StatusFlag::Unused, true);
                self.push_u8(bus, pushed_status.0);
                self.p.set(StatusFlag::InterruptDisable, true);
                self.pc = bus.read_u16(IRQ_VECTOR_ADDRESS);
                Ok(())
            }
            Opcode::RTI => {
                let status = self.pull_u8(bus);
                self.load_status(status);
                self.pc = self.pull_u16(bus);
                Ok(())
            }
        }
    }

    fn op_load_a(&mut self, bus: &impl Bus, resolved: Resolved) -> Result<()> {
        let value = resolved.read(self, bus);
        self.a = value;
        self.set_nz(value);
        Ok(())
    }

    fn op_load_x(&mut self, bus: &impl Bus, resolved: Resolved) -> Result<()> {
        let value = resolved.read(self, bus);
        self.x = value;
        self.set_nz(value);
        Ok(())
    }

    fn op_load_y(&mut self, bus: &impl Bus, resolved: Resolved) -> Result<()> {
        let value = resolved.read(self, bus);
        self.y = value;
        self.set_nz(value);
        Ok(())
    }

    fn op_store(&mut self, bus: &mut impl Bus, resolved: Resolved, value: u8) -> Result<()> {
        if resolved.is_accumulator {
            self.a = value;
        } else {
            let address = resolved.address.expect("store targets an address");
            bus.write_u8(address, value);
        }
        Ok(())
    }

    fn transfer(&mut self, value: u8, write: impl FnOnce(&mut Cpu, u8)) -> Result<()> {
        write(self, value);
        self.set_nz(value);
        Ok(())
    }

    fn op_logical(&mut self, bus: &impl Bus, resolved: Resolved, f: fn(u8, u8) -> u8) -> Result<()> {
        let value = resolved.read(self, bus);
        self.a = f(self.a, value);
        self.set_nz(self.a);
        Ok(())
    }

    fn op_bit(&mut self, bus: &impl Bus, resolved: Resolved) -> Result<()> {
        let value = resolved.read(self, bus);
        self.p.set(StatusFlag::Zero, (self.a & value) == 0);
        self.p.set(StatusFlag::Overflow, value & 0b0100_0000 != 0);
        self.p.set(StatusFlag::Negative, value & 0b1000_0000 != 0);
        Ok(())
    }

    fn op_compare(&mut self, bus: &impl Bus, resolved: Resolved, register: u8) -> Result<()> {
        let value = resolved.read(self, bus);
        let result = register.wrapping_sub(value);
        self.p.set(StatusFlag::Carry, register >= value);
        self.p.set(StatusFlag::Zero, result == 0);
        self.p.set(StatusFlag::Negative, result & 0b1000_0000 != 0);
        Ok(())
    }

    fn op_modify_memory(&mut self, bus: &mut impl Bus, resolved: Resolved, f: impl FnOnce(u8) -> u8) -> Result<()> {
        let address = resolved.address.expect("INC/DEC always target memory");
        let input = bus.read_u8(address);
        let output = f(input);
        bus.write_u8(address, output);
        self.set_nz(output);
        Ok(())
    }

    fn op_shift(&mut self, bus: &mut impl Bus, resolved: Resolved, f: impl FnOnce(u8) -> (u8, bool)) -> Result<()> {
        let input = if resolved.is_accumulator {
            self.a
        } else {
            bus.read_u8(resolved.address.expect("shift targets accumulator or memory"))
        };

        let (output, carry) = f(input);
        self.p.set(StatusFlag::Carry, carry);

        if resolved.is_accumulator {
            self.a = output;
        } else {
            bus.write_u8(resolved.address.unwrap(), output);
        }

        self.set_nz(output);
        Ok(())
    }

    fn branch(&mut self, resolved: Resolved, condition: bool, next_pc: u16) -> Result<()> {
        self.pc = if condition {
            resolved.address.expect("branches always resolve a relative target")
        } else {
            next_pc
        };
        Ok(())
    }

    fn add_with_carry(&mut self, value: u8) {
        let carry_in = self.p.get(StatusFlag::Carry) as u16;
        let sum = self.a as u16 + value as u16 + carry_in;
        let result = sum as u8;

        self.p.set(StatusFlag::Carry, sum > 0xFF);

        let overflow = (!(self.a ^ value) & (self.a ^ result) & 0x80) != 0;
        self.p.set(StatusFlag::Overflow, overflow);

        self.a = result;
        self.set_nz(result);
    }

    fn set_nz(&mut self, value: u8) {
        self.p.set(StatusFlag::Zero, value == 0);
        self.p.set(StatusFlag::Negative, value & 0b1000_0000 != 0);
    }

    /// Load a value pulled from the stack into `P`, forcing `Break` clear and `Unused` set
    /// since neither bit has real storage outside of a pushed copy of `P`.
    fn load_status(&mut self, value: u8) {
        self.p = Status(value);
        self.p.set(StatusFlag::Break, false);
        self.p.set(StatusFlag::Unused, true);
    }

    fn push_u8(&mut self, bus: &mut impl Bus, value: u8) {
        bus.write_u8(STACK_PAGE + self.sp as u16, value);
        self.sp = self.sp.wrapping_sub(1);
    }

    fn pull_u8(&mut self, bus: &impl Bus) -> u8 {
        self.sp = self.sp.wrapping_add(1);
        bus.read_u8(STACK_PAGE + self.sp as u16)
    }

    fn push_u16(&mut self, bus: &mut impl Bus, value: u16) {
        let [lo, hi] = value.to_le_bytes();
        self.push_u8(bus, hi);
        self.push_u8(bus, lo);
    }

    fn pull_u16(&mut self, bus: &impl Bus) -> u16 {
        let lo = self.pull_u8(bus);
        let hi = self.pull_u8(bus);
        u16::from_le_bytes([lo, hi])
    }
}

impl Default for Cpu {
    fn default() -> Cpu {
        Cpu::new()
    }
}

fn raw_bytes(raw: u8, length: u16, b1: u8, b2: u8) -> Vec<u8> {
    match length {
        1 => vec![raw],
        2 => vec![raw, b1],
        _ => vec![raw, b1, b2],
    }
}

/// Compute the byte the trace emitter should display for a resolved addressing mode,
/// matching the canonical nestest operand format (see the trace module for the table).
fn trace_peek_value(bus: &mut impl Bus, opcode: Opcode, mode: AddressingMode, resolved: &Resolved) -> Option<u8> {
    match mode {
        AddressingMode::ZeroPage
        | AddressingMode::ZeroPageX
        | AddressingMode::ZeroPageY
        | AddressingMode::AbsoluteX
        | AddressingMode::AbsoluteY
        | AddressingMode::IndexedIndirect
        | AddressingMode::IndirectIndexed => resolved.address.map(|a| bus.read_u8(a)),

        AddressingMode::Absolute if !matches!(opcode, Opcode::JMP | Opcode::JSR) => {
            resolved.address.map(|a| bus.read_u8(a))
        }

        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::bus::FlatBus;

    #[test]
    pub fn reset_reads_vector_from_bus() {
        let mut bus = FlatBus::new().with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        assert_eq!(cpu.pc, 0xC000);
        assert_eq!(cpu.sp, 0xFD);
        assert_eq!(cpu.p.0, 0x24);
    }

    #[test]
    pub fn reset_vector_override_wins() {
        let mut bus = FlatBus::new().with_reset_vector(0xC000);
        let mut cpu = Cpu::new().with_reset_vector_override(0xF000);
        cpu.reset(&mut bus);

        assert_eq!(cpu.pc, 0xF000);
    }

    #[test]
    pub fn lda_immediate_sets_register_and_flags() {
        let mut bus = FlatBus::new().with_program_at(0xC000, &[0xA9, 0x00]).with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.a, 0x00);
        assert!(cpu.p.get(StatusFlag::Zero));
        assert!(!cpu.p.get(StatusFlag::Negative));
    }

    #[test]
    pub fn adc_sets_carry_and_overflow_on_signed_overflow() {
        let mut bus = FlatBus::new()
            .with_program_at(0xC000, &[0xA9, 0x7F, 0x69, 0x01])
            .with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus).unwrap(); // LDA #$7F
        cpu.step(&mut bus).unwrap(); // ADC #$01

        assert_eq!(cpu.a, 0x80);
        assert!(cpu.p.get(StatusFlag::Overflow));
        assert!(!cpu.p.get(StatusFlag::Carry));
        assert!(cpu.p.get(StatusFlag::Negative));
    }

    #[test]
    pub fn cmp_sets_carry_when_register_greater_or_equal() {
        let mut bus = FlatBus::new()
            .with_program_at(0xC000, &[0xA9, 0x05, 0xC9, 0x05])
            .with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus).unwrap(); // LDA #$05
        cpu.step(&mut bus).unwrap(); // CMP #$05

        assert!(cpu.p.get(StatusFlag::Carry));
        assert!(cpu.p.get(StatusFlag::Zero));
    }

    #[test]
    pub fn cmp_clears_carry_when_register_less_than_operand() {
        let mut bus = FlatBus::new()
            .with_program_at(0xC000, &[0xA9, 0x01, 0xC9, 0x05])
            .with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus).unwrap(); // LDA #$01
        cpu.step(&mut bus).unwrap(); // CMP #$05

        assert!(!cpu.p.get(StatusFlag::Carry));
        assert!(!cpu.p.get(StatusFlag::Zero));
    }

    #[test]
    pub fn push_pull_round_trips() {
        let mut bus = FlatBus::new()
            .with_program_at(0xC000, &[0xA9, 0xE0, 0x48, 0xA9, 0x00, 0x68])
            .with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus).unwrap(); // LDA #$E0
        cpu.step(&mut bus).unwrap(); // PHA
        assert_eq!(cpu.sp, 0xFC);
        cpu.step(&mut bus).unwrap(); // LDA #$00
        cpu.step(&mut bus).unwrap(); // PLA

        assert_eq!(cpu.a, 0xE0);
        assert_eq!(cpu.sp, 0xFD);
    }

    #[test]
    pub fn jsr_then_rts_round_trips_to_the_instruction_after_jsr() {
        let mut bus = FlatBus::new()
            .with_program_at(0xC000, &[0x20, 0x00, 0xD0, 0xEA]) // JSR $D000 ; NOP
            .with_program_at(0xD000, &[0x60]) // RTS
            .with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus).unwrap(); // JSR $D000
        assert_eq!(cpu.pc, 0xD000);
        cpu.step(&mut bus).unwrap(); // RTS
        assert_eq!(cpu.pc, 0xC003);
    }

    #[test]
    pub fn unknown_opcode_returns_error() {
        let mut bus = FlatBus::new().with_program_at(0xC000, &[0x02]).with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);

        assert!(matches!(cpu.step(&mut bus), Err(Error::UnknownOpcode(0x02))));
    }

    #[test]
    pub fn jsr_pushes_return_address_minus_one() {
        let mut bus = FlatBus::new()
            .with_program_at(0xC000, &[0x20, 0x05, 0xC0])
            .with_reset_vector(0xC000);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.pc, 0xC005);
        assert_eq!(cpu.sp, 0xFB);
        assert_eq!(bus.read_u8(0x01FD), 0xC0);
        assert_eq!(bus.read_u8(0x01FC), 0x02);
    }

    #[test]
    pub fn branch_taken_skips_the_following_instruction() {
        let mut bus = FlatBus::new()
            .with_program_at(0x0600, &[0xB0, 0x02, 0xA9, 0xFF, 0xA9, 0x11])
            .with_reset_vector(0x0600);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.p.set(StatusFlag::Carry, true);
        cpu.step(&mut bus).unwrap(); // BCS +2, taken
        cpu.step(&mut bus).unwrap(); // LDA #$11

        assert_eq!(cpu.a, 0x11);
    }

    #[test]
    pub fn branch_not_taken_falls_through() {
        let mut bus = FlatBus::new()
            .with_program_at(0x0600, &[0xB0, 0x02, 0xA9, 0xFF, 0xA9, 0x11])
            .with_reset_vector(0x0600);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.p.set(StatusFlag::Carry, false);
        cpu.step(&mut bus).unwrap(); // BCS +2, not taken
        cpu.step(&mut bus).unwrap(); // LDA #$FF

        assert_eq!(cpu.a, 0xFF);
    }

    #[test]
    pub fn jmp_indirect_reproduces_page_wrap_bug() {
        let mut bus = FlatBus::new()
            .with_program_at(0xC000, &[0x6C, 0xFF, 0x30])
            .with_reset_vector(0xC000);
        bus.write_u8(0x30FF, 0x00);
        bus.write_u8(0x3000, 0x40);
        let mut cpu = Cpu::new();
        cpu.reset(&mut bus);
        cpu.step(&mut bus).unwrap();

        assert_eq!(cpu.pc, 0x4000);
    }
}
