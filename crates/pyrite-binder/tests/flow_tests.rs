use super::*;

#[test]
fn alloc_returns_increasing_indices() {
    let mut flow = FlowNodeArena::new();
    let a = flow.alloc(FlowFlags::START);
    let b = flow.alloc(FlowFlags::BRANCH_LABEL);
    assert_ne!(a, b);
    assert_eq!(flow.len(), 2);
}

#[test]
fn alloc_starts_with_no_antecedents_and_no_anchor() {
    let mut flow = FlowNodeArena::new();
    let id = flow.alloc(FlowFlags::ASSIGNMENT);
    let node = flow.get(id).unwrap();
    assert!(node.antecedents.is_empty());
    assert!(node.node.is_none());
    assert_eq!(node.flags, FlowFlags::ASSIGNMENT);
}

#[test]
fn get_mut_allows_recording_antecedents() {
    let mut flow = FlowNodeArena::new();
    let start = flow.alloc(FlowFlags::START);
    let label = flow.alloc(FlowFlags::BRANCH_LABEL);
    flow.get_mut(label).unwrap().antecedents.push(start);
    assert_eq!(flow.get(label).unwrap().antecedents.as_slice(), &[start]);
}

#[test]
fn none_id_is_distinguishable() {
    assert!(FlowNodeId::NONE.is_none());
    assert!(!FlowNodeId::NONE.is_some());
}
