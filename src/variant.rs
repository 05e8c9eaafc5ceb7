//! Target positions given on the command line.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a variant target.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VariantParseError {
    /// Wrong number of fields.
    #[error("unknown variant format '{0}', expected chrom:pos, chrom:pos:ref:alt or gene:chrom:pos:ref:alt")]
    UnknownFormat(String),

    /// Position field is not a positive integer.
    #[error("invalid position '{pos}' in variant '{text}'")]
    InvalidPosition {
        /// Full variant text.
        text: String,
        /// Offending position field.
        pos: String,
    },
}

/// Single-nucleotide variant (or bare position) to centre a snapshot on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snv {
    /// Optional gene label.
    pub gene: Option<String>,
    /// Contig name.
    pub chrom: String,
    /// 1-based position.
    pub pos: u64,
    /// Reference allele, when given.
    pub reference: Option<String>,
    /// Alternate allele, when given.
    pub alternate: Option<String>,
}

impl Snv {
    /// Display name: `chrom:pos[:ref:alt]`, prefixed by the gene when known.
    pub fn name(&self) -> String {
        let mut variant = format!("{}:{}", self.chrom, self.pos);
        if let (Some(reference), Some(alternate)) = (&self.reference, &self.alternate) {
            variant.push_str(&format!(":{reference}:{alternate}"));
        }
        match &self.gene {
            Some(gene) => format!("{gene} {variant}"),
            None => variant,
        }
    }
}

impl fmt::Display for Snv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Snv {
    type Err = VariantParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let items: Vec<&str> = text.trim().split([':', '-']).collect();
        let (gene, rest) = match items.len() {
            2 | 4 => (None, &items[..]),
            5 => (Some(items[0].to_string()), &items[1..]),
            _ => return Err(VariantParseError::UnknownFormat(text.to_string())),
        };

        let pos = rest[1]
            .parse::<u64>()
            .ok()
            .filter(|&pos| pos > 0)
            .ok_or_else(|| VariantParseError::InvalidPosition {
                text: text.to_string(),
                pos: rest[1].to_string(),
            })?;
        if rest[0].is_empty() {
            return Err(VariantParseError::UnknownFormat(text.to_string()));
        }

        Ok(Self {
            gene,
            chrom: rest[0].to_string(),
            pos,
            reference: rest.get(2).map(|allele| allele.to_string()),
            alternate: rest.get(3).map(|allele| allele.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("chr1:100", None, "chr1", 100 ; "bare position")]
    #[test_case("chr1:100:A:G", None, "chr1", 100 ; "snv")]
    #[test_case("chr7-55249071-C-T", None, "chr7", 55249071 ; "dash separated")]
    #[test_case("EGFR:chr7:55249071:C:T", Some("EGFR"), "chr7", 55249071 ; "with gene")]
    fn parses_supported_forms(text: &str, gene: Option<&str>, chrom: &str, pos: u64) {
        let snv: Snv = text.parse().unwrap();
        assert_eq!(snv.gene.as_deref(), gene);
        assert_eq!(snv.chrom, chrom);
        assert_eq!(snv.pos, pos);
    }

    #[test]
    fn names_follow_input_detail() {
        let snv: Snv = "EGFR:chr7:55249071:C:T".parse().unwrap();
        assert_eq!(snv.name(), "EGFR chr7:55249071:C:T");
        let bare: Snv = "chr1:100".parse().unwrap();
        assert_eq!(bare.to_string(), "chr1:100");
    }

    #[test_case("chr1" ; "missing position")]
    #[test_case("chr1:1:A" ; "three fields")]
    #[test_case("a:b:c:d:e:f" ; "six fields")]
    #[test_case(":100" ; "empty contig")]
    fn rejects_unknown_forms(text: &str) {
        assert!(matches!(
            text.parse::<Snv>(),
            Err(VariantParseError::UnknownFormat(_))
        ));
    }

    #[test_case("chr1:abc" ; "not a number")]
    #[test_case("chr1:0:A:G" ; "zero")]
    fn rejects_bad_positions(text: &str) {
        assert!(matches!(
            text.parse::<Snv>(),
            Err(VariantParseError::InvalidPosition { .. })
        ));
    }
}
