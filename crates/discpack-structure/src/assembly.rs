//! Mnemonic source for the disc computer, assembled into disc ids.
//!
//! Each instruction is one music disc. Source is one instruction per line,
//! `;` starts a comment, and macros are declared as
//!
//! ```text
//! def name(a, b)
//!     a
//!     LD
//!     b
//! end
//! ```
//!
//! and invoked as `name(OR, XOR)`. A `SKZ` directly in front of an
//! invocation guards every instruction of the expansion instead: the `SKZ`
//! line is dropped and one is placed between each pair of expanded lines.
//! The assembled program is padded with `NOT` to whole shulker boxes.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::config::SINGLE_CHEST_SLOTS;
use crate::error::AssemblyError;
use crate::identifier::ItemId;

/// Programs are padded to a multiple of this many instructions.
pub const PROGRAM_MULTIPLE: usize = SINGLE_CHEST_SLOTS;

/// Deepest chain of macro invocations that is expanded.
pub const MAX_MACRO_DEPTH: usize = 1024;

/// Upper bound on the expanded program, far beyond what a chest holds.
pub const MAX_PROGRAM_LEN: usize = 1 << 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    Not,
    Skz,
    Or,
    Ld,
    Xor,
    Out,
    And,
    Da1,
    Da2,
    Da3,
    Da4,
    Da5,
    Da6,
    Da7,
    Da8,
}

impl Opcode {
    pub const ALL: [Opcode; 15] = [
        Opcode::Not,
        Opcode::Skz,
        Opcode::Or,
        Opcode::Ld,
        Opcode::Xor,
        Opcode::Out,
        Opcode::And,
        Opcode::Da1,
        Opcode::Da2,
        Opcode::Da3,
        Opcode::Da4,
        Opcode::Da5,
        Opcode::Da6,
        Opcode::Da7,
        Opcode::Da8,
    ];

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Not => "NOT",
            Opcode::Skz => "SKZ",
            Opcode::Or => "OR",
            Opcode::Ld => "LD",
            Opcode::Xor => "XOR",
            Opcode::Out => "OUT",
            Opcode::And => "AND",
            Opcode::Da1 => "DA1",
            Opcode::Da2 => "DA2",
            Opcode::Da3 => "DA3",
            Opcode::Da4 => "DA4",
            Opcode::Da5 => "DA5",
            Opcode::Da6 => "DA6",
            Opcode::Da7 => "DA7",
            Opcode::Da8 => "DA8",
        }
    }

    /// Name of the disc encoding this instruction.
    pub fn disc(self) -> &'static str {
        match self {
            Opcode::Not => "13",
            Opcode::Skz => "cat",
            Opcode::Or => "blocks",
            Opcode::Ld => "chirp",
            Opcode::Xor => "far",
            Opcode::Out => "mall",
            Opcode::And => "mellohi",
            Opcode::Da1 => "stal",
            Opcode::Da2 => "strd",
            Opcode::Da3 => "ward",
            Opcode::Da4 => "11",
            Opcode::Da5 => "wait",
            Opcode::Da6 => "pigstep",
            Opcode::Da7 => "otherside",
            Opcode::Da8 => "5",
        }
    }

    pub fn from_mnemonic(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.mnemonic() == text)
    }

    /// The vanilla disc item, whatever namespace the layout uses.
    pub fn item_id(self) -> ItemId {
        ItemId(format!("minecraft:music_disc_{}", self.disc()))
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Assemble mnemonic source into a padded program.
pub fn assemble(source: &str) -> Result<Vec<Opcode>, AssemblyError> {
    let (macros, program) = collect_macros(source_lines(source))?;
    debug!(
        macros = macros.len(),
        lines = program.len(),
        "parsed assembly source"
    );

    let mut expander = Expander {
        macros: &macros,
        out: Vec::new(),
    };
    expander.expand(&program, 0)?;

    let mut out = expander.out;
    pad(&mut out);
    Ok(out)
}

#[derive(Debug, Clone)]
struct Line {
    number: usize,
    text: String,
}

struct Macro {
    params: Vec<String>,
    body: Vec<Line>,
}

fn source_lines(source: &str) -> Vec<Line> {
    source
        .lines()
        .enumerate()
        .filter_map(|(index, raw)| {
            let code = raw.split_once(';').map_or(raw, |(code, _)| code).trim();
            (!code.is_empty()).then(|| Line {
                number: index + 1,
                text: code.to_string(),
            })
        })
        .collect()
}

/// Split `name(a, b)` into the name and its trimmed, non-empty arguments.
fn parse_call(text: &str) -> Option<(&str, Vec<&str>)> {
    let (name, rest) = text.split_once('(')?;
    let args = rest.strip_suffix(')')?;
    let name = name.trim();
    if name.is_empty() || args.contains(|c: char| c == '(' || c == ')') {
        return None;
    }
    let args = args
        .split(',')
        .map(str::trim)
        .filter(|arg| !arg.is_empty())
        .collect();
    Some((name, args))
}

/// Pull every `def ... end` block out of the source, leaving the program.
/// Definitions are global, so a macro may be used above its definition.
fn collect_macros(lines: Vec<Line>) -> Result<(HashMap<String, Macro>, Vec<Line>), AssemblyError> {
    let mut macros = HashMap::new();
    let mut program = Vec::new();
    let mut lines = lines.into_iter();

    while let Some(line) = lines.next() {
        if !line.text.starts_with("def ") {
            program.push(line);
            continue;
        }
        let header = &line.text["def ".len()..];
        let malformed = || AssemblyError::MalformedDefinition {
            line: line.number,
            text: line.text.clone(),
        };

        let (name, params) = parse_call(header.trim()).ok_or_else(malformed)?;
        if name.contains(char::is_whitespace) || Opcode::from_mnemonic(name).is_some() {
            return Err(malformed());
        }
        for (i, param) in params.iter().enumerate() {
            if Opcode::from_mnemonic(param).is_some() || params[..i].contains(param) {
                return Err(malformed());
            }
        }
        let name = name.to_string();
        let params: Vec<String> = params.into_iter().map(String::from).collect();

        let mut body = Vec::new();
        loop {
            let Some(body_line) = lines.next() else {
                return Err(AssemblyError::UnterminatedMacro {
                    line: line.number,
                    name,
                });
            };
            if body_line.text == "end" {
                break;
            }
            let known = params.contains(&body_line.text)
                || Opcode::from_mnemonic(&body_line.text).is_some()
                || parse_call(&body_line.text).is_some();
            if !known {
                return Err(AssemblyError::UnknownInstruction {
                    line: body_line.number,
                    text: body_line.text,
                });
            }
            body.push(body_line);
        }

        if macros.contains_key(&name) {
            return Err(AssemblyError::DuplicateMacro {
                line: line.number,
                name,
            });
        }
        macros.insert(name, Macro { params, body });
    }

    Ok((macros, program))
}

struct Expander<'m> {
    macros: &'m HashMap<String, Macro>,
    out: Vec<Opcode>,
}

impl Expander<'_> {
    fn expand(&mut self, lines: &[Line], depth: usize) -> Result<(), AssemblyError> {
        let mut i = 0;
        while i < lines.len() {
            let line = &lines[i];

            if line.text == Opcode::Skz.mnemonic() {
                if let Some(next) = lines.get(i + 1) {
                    if let Some(body) = self.invoke(next)? {
                        self.descend(&guard_with_skz(body), depth, next.number)?;
                        i += 2;
                        continue;
                    }
                }
            }

            if let Some(body) = self.invoke(line)? {
                self.descend(&body, depth, line.number)?;
            } else if let Some(op) = Opcode::from_mnemonic(&line.text) {
                self.push(op)?;
            } else {
                return Err(AssemblyError::UnknownInstruction {
                    line: line.number,
                    text: line.text.clone(),
                });
            }
            i += 1;
        }
        Ok(())
    }

    fn descend(&mut self, body: &[Line], depth: usize, at: usize) -> Result<(), AssemblyError> {
        if depth >= MAX_MACRO_DEPTH {
            return Err(AssemblyError::ExpansionTooDeep {
                line: at,
                limit: MAX_MACRO_DEPTH,
            });
        }
        self.expand(body, depth + 1)
    }

    fn push(&mut self, op: Opcode) -> Result<(), AssemblyError> {
        if self.out.len() >= MAX_PROGRAM_LEN {
            return Err(AssemblyError::ProgramTooLarge {
                limit: MAX_PROGRAM_LEN,
            });
        }
        self.out.push(op);
        Ok(())
    }

    /// The body of the macro invoked on `line` with arguments substituted,
    /// or `None` when the line is not an invocation.
    fn invoke(&self, line: &Line) -> Result<Option<Vec<Line>>, AssemblyError> {
        let Some((name, args)) = parse_call(&line.text) else {
            return Ok(None);
        };
        let Some(macro_def) = self.macros.get(name) else {
            return Err(AssemblyError::UnknownMacro {
                line: line.number,
                name: name.to_string(),
            });
        };
        if args.len() != macro_def.params.len() {
            return Err(AssemblyError::ArgumentCount {
                line: line.number,
                name: name.to_string(),
                expected: macro_def.params.len(),
                got: args.len(),
            });
        }
        if let Some(bad) = args.iter().find(|arg| Opcode::from_mnemonic(arg).is_none()) {
            return Err(AssemblyError::InvalidArgument {
                line: line.number,
                name: name.to_string(),
                arg: bad.to_string(),
            });
        }

        let substitute = |text: &str| -> String {
            match macro_def.params.iter().position(|p| p == text) {
                Some(index) => args[index].to_string(),
                None => text.to_string(),
            }
        };
        let body = macro_def
            .body
            .iter()
            .map(|body_line| {
                let text = match parse_call(&body_line.text) {
                    Some((inner, inner_args)) => {
                        let inner_args: Vec<String> =
                            inner_args.into_iter().map(substitute).collect();
                        format!("{inner}({})", inner_args.join(", "))
                    }
                    None => substitute(&body_line.text),
                };
                Line {
                    number: body_line.number,
                    text,
                }
            })
            .collect();
        Ok(Some(body))
    }
}

/// Put a `SKZ` between each pair of lines, none after the last.
fn guard_with_skz(body: Vec<Line>) -> Vec<Line> {
    let last = body.len().saturating_sub(1);
    let mut guarded = Vec::with_capacity(body.len() * 2);
    for (i, line) in body.into_iter().enumerate() {
        let number = line.number;
        guarded.push(line);
        if i < last {
            guarded.push(Line {
                number,
                text: Opcode::Skz.mnemonic().to_string(),
            });
        }
    }
    guarded
}

fn pad(program: &mut Vec<Opcode>) {
    let remainder = program.len() % PROGRAM_MULTIPLE;
    if remainder != 0 {
        let added = PROGRAM_MULTIPLE - remainder;
        program.resize(program.len() + added, Opcode::Not);
        debug!(added, total = program.len(), "padded program with NOT");
    }
}
