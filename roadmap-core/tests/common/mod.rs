use roadmap_core::{GenerationParameters, GenerationRequest};

/// Request matching the documented four-node walkthrough.
#[must_use]
pub fn walkthrough_request() -> GenerationRequest {
    GenerationRequest {
        node_count: 4,
        max_edges_per_node: 1,
        store_count: 1,
        warehouse_count: 1,
        good_type_count: 1,
        supply: vec![3],
        demand: vec![2],
    }
}

#[must_use]
pub fn validated(request: GenerationRequest) -> GenerationParameters {
    match request.validate() {
        Ok(params) => params,
        Err(err) => panic!("test request must validate: {err}"),
    }
}
