//! Cycle detection over an adjacency list.
//!
//! Depth-first search with the usual three colours, driven by an explicit
//! stack so deep chains of modules cannot overflow the call stack.

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Colour {
    /// Not visited yet.
    White,
    /// On the current search path.
    Grey,
    /// Fully explored.
    Black,
}

/// Returns `true` when `adjacency` contains a directed cycle.
///
/// Every successor listed in `adjacency` must itself index into `adjacency`.
pub(super) fn has_cycle(adjacency: &[Vec<usize>]) -> bool {
    let mut colours = vec![Colour::White; adjacency.len()];
    // (node, index of the next successor to visit)
    let mut stack: Vec<(usize, usize)> = Vec::new();

    for root in 0..adjacency.len() {
        if colours[root] != Colour::White {
            continue;
        }
        colours[root] = Colour::Grey;
        stack.push((root, 0));

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let Some(&child) = adjacency[node].get(next) else {
                colours[node] = Colour::Black;
                stack.pop();
                continue;
            };
            frame.1 += 1;
            match colours[child] {
                Colour::Grey => return true,
                Colour::White => {
                    colours[child] = Colour::Grey;
                    stack.push((child, 0));
                }
                Colour::Black => {}
            }
        }
    }
    false
}
