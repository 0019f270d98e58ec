//! NEO VM opcode constants.
//!
//! Only the opcodes that transaction construction emits or inspects are
//! named here; every other byte is rendered as `UNKNOWN_0x..` in ASM output.

// Constants
pub const OP_PUSH0: u8 = 0x00;
pub const OP_PUSHF: u8 = OP_PUSH0;
pub const OP_PUSHBYTES1: u8 = 0x01;
pub const OP_PUSHBYTES20: u8 = 0x14;
pub const OP_PUSHBYTES33: u8 = 0x21;
pub const OP_PUSHBYTES64: u8 = 0x40;
pub const OP_PUSHBYTES75: u8 = 0x4b;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_PUSHM1: u8 = 0x4f;
pub const OP_PUSH1: u8 = 0x51;
pub const OP_PUSHT: u8 = OP_PUSH1;
pub const OP_PUSH16: u8 = 0x60;

// Flow control
pub const OP_NOP: u8 = 0x61;
pub const OP_JMP: u8 = 0x62;
pub const OP_JMPIF: u8 = 0x63;
pub const OP_JMPIFNOT: u8 = 0x64;
pub const OP_CALL: u8 = 0x65;
pub const OP_RET: u8 = 0x66;
pub const OP_APPCALL: u8 = 0x67;
pub const OP_SYSCALL: u8 = 0x68;
pub const OP_TAILCALL: u8 = 0x69;

// Stack
pub const OP_DUP: u8 = 0x76;
pub const OP_DROP: u8 = 0x75;
pub const OP_SWAP: u8 = 0x7c;

// Crypto
pub const OP_SHA1: u8 = 0xa7;
pub const OP_SHA256: u8 = 0xa8;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_HASH256: u8 = 0xaa;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_VERIFY: u8 = 0xad;
pub const OP_CHECKMULTISIG: u8 = 0xae;

// Arrays
pub const OP_ARRAYSIZE: u8 = 0xc0;
pub const OP_PACK: u8 = 0xc1;
pub const OP_UNPACK: u8 = 0xc2;
pub const OP_PICKITEM: u8 = 0xc3;
pub const OP_NEWARRAY: u8 = 0xc5;
pub const OP_NEWSTRUCT: u8 = 0xc6;

// Exceptions
pub const OP_THROW: u8 = 0xf0;
pub const OP_THROWIFNOT: u8 = 0xf1;

/// Check whether `op` pushes a small integer constant (PUSHM1, PUSH0, PUSH1..PUSH16).
pub fn is_small_int_op(op: u8) -> bool {
    op == OP_PUSH0 || op == OP_PUSHM1 || (OP_PUSH1..=OP_PUSH16).contains(&op)
}

/// Return the opcode that pushes `n`, if `n` is in `-1..=16`.
pub fn small_int_op(n: i64) -> Option<u8> {
    match n {
        -1 => Some(OP_PUSHM1),
        0 => Some(OP_PUSH0),
        1..=16 => Some(OP_PUSH1 - 1 + n as u8),
        _ => None,
    }
}

/// Return the ASM name of `op`.
pub fn opcode_to_string(op: u8) -> String {
    let name = match op {
        OP_PUSH0 => "PUSH0",
        OP_PUSHBYTES1..=OP_PUSHBYTES75 => return format!("PUSHBYTES{}", op),
        OP_PUSHDATA1 => "PUSHDATA1",
        OP_PUSHDATA2 => "PUSHDATA2",
        OP_PUSHDATA4 => "PUSHDATA4",
        OP_PUSHM1 => "PUSHM1",
        OP_PUSH1..=OP_PUSH16 => return format!("PUSH{}", op - OP_PUSH1 + 1),
        OP_NOP => "NOP",
        OP_JMP => "JMP",
        OP_JMPIF => "JMPIF",
        OP_JMPIFNOT => "JMPIFNOT",
        OP_CALL => "CALL",
        OP_RET => "RET",
        OP_APPCALL => "APPCALL",
        OP_SYSCALL => "SYSCALL",
        OP_TAILCALL => "TAILCALL",
        OP_DUP => "DUP",
        OP_DROP => "DROP",
        OP_SWAP => "SWAP",
        OP_SHA1 => "SHA1",
        OP_SHA256 => "SHA256",
        OP_HASH160 => "HASH160",
        OP_HASH256 => "HASH256",
        OP_CHECKSIG => "CHECKSIG",
        OP_VERIFY => "VERIFY",
        OP_CHECKMULTISIG => "CHECKMULTISIG",
        OP_ARRAYSIZE => "ARRAYSIZE",
        OP_PACK => "PACK",
        OP_UNPACK => "UNPACK",
        OP_PICKITEM => "PICKITEM",
        OP_NEWARRAY => "NEWARRAY",
        OP_NEWSTRUCT => "NEWSTRUCT",
        OP_THROW => "THROW",
        OP_THROWIFNOT => "THROWIFNOT",
        _ => return format!("UNKNOWN_0x{:02x}", op),
    };
    name.to_string()
}
