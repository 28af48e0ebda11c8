use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Normalize,
    DedupeColumns,
    DedupeRows,
    Split,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Normalize,
        Operation::DedupeColumns,
        Operation::DedupeRows,
        Operation::Split,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Operation::Normalize => "normalize",
            Operation::DedupeColumns => "dedupe-columns",
            Operation::DedupeRows => "dedupe-rows",
            Operation::Split => "split",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Operation {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.name() == s)
            .ok_or_else(|| {
                let names: Vec<&str> = Operation::ALL.iter().map(Operation::name).collect();
                anyhow::anyhow!(
                    "unknown operation '{}'; expected one of: {}",
                    s,
                    names.join(", ")
                )
            })
    }
}
