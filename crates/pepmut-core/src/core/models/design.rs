use crate::core::tables;
use itertools::Itertools;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DesignError {
    #[error("Library template is empty")]
    Empty,

    #[error("Template length ({template}) does not match parent length ({parent})")]
    LengthMismatch { template: usize, parent: usize },

    #[error("Parent sequence has non-amino-acid character '{residue}' at position {position}")]
    InvalidParentResidue { position: usize, residue: char },

    #[error("Template has character '{residue}' at position {position}; expected an amino acid or a digit")]
    InvalidTemplateResidue { position: usize, residue: char },
}

/// Fixed-length library layout: which positions are randomized and what the parent carries there.
///
/// Digits in the template mark randomized positions (the digit value itself is ignored),
/// letters mark constant scaffold residues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryDesign {
    template: Vec<u8>,
    parent: Vec<u8>,
    variable_mask: Vec<bool>,
    variable_positions: Vec<usize>,
    variable_region: Vec<u8>,
}

impl LibraryDesign {
    pub fn new(template: &str, parent: &str) -> Result<Self, DesignError> {
        let template = template.as_bytes().to_vec();
        let parent = parent.as_bytes().to_vec();

        if template.is_empty() {
            return Err(DesignError::Empty);
        }
        if template.len() != parent.len() {
            return Err(DesignError::LengthMismatch {
                template: template.len(),
                parent: parent.len(),
            });
        }
        if let Some((position, &residue)) = template
            .iter()
            .find_position(|&&c| !c.is_ascii_digit() && !tables::is_amino_acid(c))
        {
            return Err(DesignError::InvalidTemplateResidue {
                position,
                residue: residue as char,
            });
        }
        if let Some((position, &residue)) = parent
            .iter()
            .find_position(|&&c| !tables::is_amino_acid(c))
        {
            return Err(DesignError::InvalidParentResidue {
                position,
                residue: residue as char,
            });
        }

        let variable_mask: Vec<bool> = template.iter().map(u8::is_ascii_digit).collect();
        let variable_positions: Vec<usize> = variable_mask.iter().positions(|&v| v).collect();
        let variable_region = variable_positions.iter().map(|&i| parent[i]).collect();

        Ok(Self {
            template,
            parent,
            variable_mask,
            variable_positions,
            variable_region,
        })
    }

    /// Expected peptide length `L`.
    pub fn len(&self) -> usize {
        self.template.len()
    }

    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    pub fn template(&self) -> &[u8] {
        &self.template
    }

    pub fn parent(&self) -> &[u8] {
        &self.parent
    }

    pub fn variable_mask(&self) -> &[bool] {
        &self.variable_mask
    }

    pub fn constant_mask(&self) -> Vec<bool> {
        self.variable_mask.iter().map(|v| !v).collect()
    }

    /// Indices of randomized positions, ascending.
    pub fn variable_positions(&self) -> &[usize] {
        &self.variable_positions
    }

    /// The parent restricted to the randomized positions.
    pub fn variable_region(&self) -> &[u8] {
        &self.variable_region
    }

    /// The scaffold residues shared by every library member.
    pub fn constant_region(&self) -> Vec<u8> {
        self.template
            .iter()
            .zip(&self.variable_mask)
            .filter(|(_, v)| !**v)
            .map(|(&c, _)| c)
            .collect()
    }
}
