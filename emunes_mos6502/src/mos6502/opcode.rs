#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Opcode {
    // Register Operations
    LDA,
    LDX,
    LDY,
    STA,
    STX,
    STY,
    TAX,
    TAY,
    TXA,
    TYA,

    // Stack Operations
    TSX,
    TXS,
    PHA,
    PHP,
    PLA,
    PLP,

    // Logical Operations
    AND,
    EOR,
    ORA,
    BIT,

    // Arithmetic
    ADC,
    SBC,
    CMP,
    CPX,
    CPY,

    // Increments & Decrements
    INC,
    INX,
    INY,
    DEC,
    DEX,
    DEY,

    // Shifts
    ASL,
    LSR,
    ROL,
    ROR,

    // Jumps & Calls
    JMP,
    JSR,
    RTS,

    // Branches
    BCC,
    BCS,
    BEQ,
    BNE,
    BMI,
    BPL,
    BVC,
    BVS,

    // Status Flag Changes
    CLC,
    CLD,
    CLI,
    CLV,
    SEC,
    SED,
    SEI,

    // System Functions
    BRK,
    NOP,
    RTI,
}

impl Opcode {
    /// Three-letter mnemonic, as used by the canonical disassembly trace format.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::LDA => "LDA",
            Opcode::LDX => "LDX",
            Opcode::LDY => "LDY",
            Opcode::STA => "STA",
            Opcode::STX => "STX",
            Opcode::STY => "STY",
            Opcode::TAX => "TAX",
            Opcode::TAY => "TAY",
            Opcode::TXA => "TXA",
            Opcode::TYA => "TYA",
            Opcode::TSX => "TSX",
            Opcode::TXS => "TXS",
            Opcode::PHA => "PHA",
            Opcode::PHP => "PHP",
            Opcode::PLA => "PLA",
            Opcode::PLP => "PLP",
            Opcode::AND => "AND",
            Opcode::EOR => "EOR",
            Opcode::ORA => "ORA",
            Opcode::BIT => "BIT",
            Opcode::ADC => "ADC",
            Opcode::SBC => "SBC",
            Opcode::CMP => "CMP",
            Opcode::CPX => "CPX",
            Opcode::CPY => "CPY",
            Opcode::INC => "INC",
            Opcode::INX => "INX",
            Opcode::INY => "INY",
            Opcode::DEC => "DEC",
            Opcode::DEX => "DEX",
            Opcode::DEY => "DEY",
            Opcode::ASL => "ASL",
            Opcode::LSR => "LSR",
            Opcode::ROL => "ROL",
            Opcode::ROR => "ROR",
            Opcode::JMP => "JMP",
            Opcode::JSR => "JSR",
            Opcode::RTS => "RTS",
            Opcode::BCC => "BCC",
            Opcode::BCS => "BCS",
            Opcode::BEQ => "BEQ",
            Opcode::BNE => "BNE",
            Opcode::BMI => "BMI",
            Opcode::BPL => "BPL",
            Opcode::BVC => "BVC",
            Opcode::BVS => "BVS",
            Opcode::CLC => "CLC",
            Opcode::CLD => "CLD",
            Opcode::CLI => "CLI",
            Opcode::CLV => "CLV",
            Opcode::SEC => "SEC",
            Opcode::SED => "SED",
            Opcode::SEI => "SEI",
            Opcode::BRK => "BRK",
            Opcode::NOP => "NOP",
            Opcode::RTI => "RTI",
        }
    }
}
