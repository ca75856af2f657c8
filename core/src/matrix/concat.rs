use std::{collections::HashSet, fmt, iter, str::FromStr};

use crate::{CharacterState, Error, TaxonData};

use super::CharacterMatrix;

/// How taxa are matched up when concatenating character matrices.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Concatenation {
    /// Both matrices must contain exactly the same taxa.
    #[default]
    Strict,
    /// All taxa are kept; characters missing for a taxon in one of the matrices are missing.
    Union,
    /// Only taxa found in both matrices are kept.
    Intersection,
}

impl fmt::Display for Concatenation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Concatenation::Strict => "strict",
            Concatenation::Union => "union",
            Concatenation::Intersection => "intersection",
        })
    }
}

impl FromStr for Concatenation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "strict" => Ok(Concatenation::Strict),
            "union" => Ok(Concatenation::Union),
            "intersection" => Ok(Concatenation::Intersection),
            _ => Err(format!("unknown concatenation policy '{s}'")),
        }
    }
}

impl CharacterMatrix {
    /// Appends the characters of another matrix to the characters of this matrix.
    ///
    /// Rows are matched by taxon name, as determined by the concatenation policy. Characters
    /// excluded in the other matrix remain excluded after concatenation, as do taxa excluded in
    /// either matrix. On error, the matrix is left unchanged.
    pub fn concatenate(
        &mut self,
        other: &CharacterMatrix,
        policy: Concatenation,
    ) -> Result<(), Error> {
        Error::check_type(self.data_type, other.data_type)?;

        if policy == Concatenation::Strict {
            let unmatched = self
                .taxon_names()
                .find(|name| !other.rows.contains_key(*name))
                .or_else(|| other.taxon_names().find(|name| !self.rows.contains_key(*name)));

            if let Some(name) = unmatched {
                return Err(Error::TaxonSetMismatch {
                    name: name.to_string(),
                });
            }
        }

        let offset = self.num_characters();
        let other_len = other.num_characters();

        let excluded = self
            .rows
            .keys()
            .enumerate()
            .filter(|(i, _)| self.excluded_taxa.contains(i))
            .map(|(_, name)| name.clone())
            .chain(
                other
                    .rows
                    .keys()
                    .enumerate()
                    .filter(|(i, _)| other.excluded_taxa.contains(i))
                    .map(|(_, name)| name.clone()),
            )
            .collect::<HashSet<_>>();

        if policy == Concatenation::Union {
            for row in other.rows() {
                if !self.rows.contains_key(row.name()) {
                    self.add_missing_taxon(row.taxon().clone())?;
                }
            }
        }

        for (name, row) in self.rows.iter_mut() {
            match other.rows.get(name) {
                Some(other_row) => row.concatenate(other_row)?,
                None => {
                    let missing = TaxonData::from_states(
                        row.taxon().clone(),
                        other.data_type,
                        iter::repeat(CharacterState::missing(other.data_type)).take(other_len),
                    )?;
                    row.concatenate(&missing)?;
                }
            }
        }

        if policy == Concatenation::Intersection {
            self.rows.retain(|name, _| other.rows.contains_key(name));
        }

        self.excluded_taxa = self
            .rows
            .keys()
            .enumerate()
            .filter(|(_, name)| excluded.contains(*name))
            .map(|(i, _)| i)
            .collect();

        if self.rows.is_empty() {
            self.excluded_characters.clear();
        } else {
            self.excluded_characters
                .extend(other.excluded_characters.iter().map(|i| i + offset));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::BTreeSet;

    use crate::{
        matrix::tests::{dna, strings},
        DataType,
    };

    #[test]
    fn test_strict() {
        let mut m = dna(&[("a", "AC"), ("b", "GT")]);
        let mut other = dna(&[("b", "TTT"), ("a", "AAA")]);
        other.exclude_character(1).unwrap();
        m.exclude_character(0).unwrap();

        m.concatenate(&other, Concatenation::Strict).unwrap();

        assert_eq!(m.num_characters(), 5);
        assert_eq!(strings(&m), vec!["ACAAA", "GTTTT"]);
        assert_eq!(m.excluded_characters(), &BTreeSet::from([0, 3]));
    }

    #[test]
    fn test_strict_taxon_set_mismatch() {
        let mut m = dna(&[("a", "AC"), ("b", "GT")]);
        let other = dna(&[("a", "AA"), ("c", "TT")]);

        assert_eq!(
            m.concatenate(&other, Concatenation::Strict),
            Err(Error::TaxonSetMismatch {
                name: String::from("b")
            })
        );
        assert_eq!(strings(&m), vec!["AC", "GT"]);
    }

    #[test]
    fn test_type_mismatch() {
        let mut m = dna(&[("a", "AC")]);
        let other = CharacterMatrix::new(DataType::Rna);

        assert!(matches!(
            m.concatenate(&other, Concatenation::Union),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_union() {
        let mut m = dna(&[("a", "AC"), ("b", "GT")]);
        let other = dna(&[("b", "TTT"), ("c", "CCC")]);

        m.concatenate(&other, Concatenation::Union).unwrap();

        assert_eq!(m.taxon_names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
        assert_eq!(strings(&m), vec!["AC???", "GTTTT", "??CCC"]);
    }

    #[test]
    fn test_union_with_excluded_disjoint_taxon_preserves_values() {
        let mut m = dna(&[("a", "ACGT"), ("b", "GTCA")]);
        let before = strings(&m);

        let mut other = dna(&[("c", "")]);
        other.exclude_taxon(0).unwrap();

        m.concatenate(&other, Concatenation::Union).unwrap();

        assert_eq!(m.num_included_taxa(), 2);
        assert!(m.is_taxon_excluded(2));
        assert_eq!(
            m.included_rows()
                .map(|row| row.iter().map(|s| s.string_value()).collect::<String>())
                .collect::<Vec<_>>(),
            before
        );
    }

    #[test]
    fn test_intersection() {
        let mut m = dna(&[("a", "AC"), ("b", "GT"), ("c", "CC")]);
        m.exclude_taxon(2).unwrap();
        let other = dna(&[("c", "G"), ("a", "T")]);

        m.concatenate(&other, Concatenation::Intersection).unwrap();

        assert_eq!(m.taxon_names().collect::<Vec<_>>(), vec!["a", "c"]);
        assert_eq!(strings(&m), vec!["ACT", "CCG"]);
        assert_eq!(m.excluded_taxa(), &BTreeSet::from([1]));
    }

    #[test]
    fn test_intersection_without_shared_taxa_clears_character_mask() {
        let mut m = dna(&[("a", "AC")]);
        m.exclude_character(0).unwrap();
        let mut other = dna(&[("b", "G")]);
        other.exclude_character(0).unwrap();

        m.concatenate(&other, Concatenation::Intersection).unwrap();

        assert_eq!(m.num_taxa(), 0);
        assert!(m.excluded_characters().is_empty());
        assert_eq!(m.num_included_characters(), 0);
        assert_eq!(m.num_segregating_sites(false), 0);
    }

    #[test]
    fn test_strict_after_rename() {
        let mut m = dna(&[("a", "AC"), ("b", "GT")]);
        m.set_taxon_name("a", "x").unwrap();
        let other = dna(&[("b", "T"), ("x", "A")]);

        m.concatenate(&other, Concatenation::Strict).unwrap();

        assert_eq!(m.taxon_names().collect::<Vec<_>>(), vec!["x", "b"]);
        assert_eq!(strings(&m), vec!["ACA", "GTT"]);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Union".parse(), Ok(Concatenation::Union));
        assert_eq!(Concatenation::Intersection.to_string(), "intersection");
        assert!("merge".parse::<Concatenation>().is_err());
    }
}
