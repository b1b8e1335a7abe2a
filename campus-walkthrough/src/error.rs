use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalkthroughError {
    #[error("collision proxy mesh '{0}' has no vertex positions")]
    ProxyWithoutPositions(String),
    #[error("collision proxy mesh '{0}' is not a triangle list")]
    ProxyNotTriangles(String),
    #[error("collision proxy mesh '{0}' is not loaded")]
    ProxyMeshMissing(String),
    #[error("anchor '{anchor}' needs scene node '{node}', which was not found")]
    DerivedAnchorSourceMissing { anchor: String, node: String },
    #[error("invalid XR bridge parameters: {0}")]
    InvalidBridgeParams(String),
}
