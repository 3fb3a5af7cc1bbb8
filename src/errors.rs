use error_chain::error_chain;

error_chain! {
    errors {
        InvalidDimensions(width: usize, height: usize) {
            description("maze dimensions must both be at least one cell")
            display("invalid maze dimensions: {}x{}", width, height)
        }
        GridTooLarge(cells: usize) {
            description("cell count exceeds the supported coordinate range")
            display("grid of {} cells exceeds the supported size", cells)
        }
    }
}
