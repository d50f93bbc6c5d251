mod mos6502;

pub use mos6502::addressing_mode::AddressingMode;
pub use mos6502::bus::Bus;
pub use mos6502::decode::{decode, DecodedOpcode};
pub use mos6502::error::Error;
pub use mos6502::opcode::Opcode;
pub use mos6502::status::{Status, StatusFlag};
pub use mos6502::trace::StepTrace;
pub use mos6502::{Cpu, Result, RESET_VECTOR_ADDRESS, IRQ_VECTOR_ADDRESS};
