//! Setup-time validation of the model tree.

use std::collections::HashSet;

use mf_core::MfResult;

use crate::component::{VarKind, Variable};
use crate::error::ModelError;
use crate::group::Group;

/// Check that a group's direct children carry legal, unique names.
pub(crate) fn check_child_names(parent: &str, group: &Group) -> MfResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for (name, _) in group.children() {
        if name.is_empty() || name.contains('.') {
            return Err(ModelError::BadChildName {
                parent: parent.to_string(),
                name: name.to_string(),
            }
            .into());
        }
        if !seen.insert(name) {
            return Err(ModelError::DuplicateChild {
                parent: parent.to_string(),
                name: name.to_string(),
            }
            .into());
        }
    }
    Ok(())
}

/// Check that a component's variables carry legal, unique names.
pub(crate) fn check_var_names(unit: &str, vars: &[Variable]) -> MfResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for var in vars {
        if var.name.is_empty() || var.name.contains('.') {
            return Err(ModelError::BadChildName {
                parent: unit.to_string(),
                name: var.name.clone(),
            }
            .into());
        }
        if !seen.insert(&var.name) {
            return Err(ModelError::DuplicateVar {
                unit: unit.to_string(),
                name: var.name.clone(),
            }
            .into());
        }
    }
    Ok(())
}

/// Check connection endpoint directions: output feeds param.
pub(crate) fn check_conn_kinds(
    src_path: &str,
    src_kind: VarKind,
    dst_path: &str,
    dst_kind: VarKind,
) -> MfResult<()> {
    if src_kind != VarKind::Output {
        return Err(ModelError::SourceNotOutput {
            path: src_path.to_string(),
        }
        .into());
    }
    if dst_kind != VarKind::Param {
        return Err(ModelError::DestNotParam {
            path: dst_path.to_string(),
        }
        .into());
    }
    Ok(())
}

/// Check connected endpoints hold values of equal length.
pub(crate) fn check_conn_lens(
    src_path: &str,
    dst_path: &str,
    src_len: usize,
    dst_len: usize,
) -> MfResult<()> {
    if src_len != dst_len {
        return Err(ModelError::LengthMismatch {
            src: src_path.to_string(),
            dst: dst_path.to_string(),
            src_len,
            dst_len,
        }
        .into());
    }
    Ok(())
}
