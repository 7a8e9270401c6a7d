use hogrs_tensor::Tensor2;

/// Flatten normalized block vectors into the final descriptor.
///
/// Blocks are concatenated in the order they are stored; no reordering happens here.
///
/// # Example
///
/// ```
/// use hogrs_tensor::Tensor2;
/// use hogrs_imgproc::descriptor::assemble_descriptor;
///
/// let blocks = Tensor2::from_shape_vec([2, 2], vec![0.6f32, 0.8, 1.0, 0.0]).unwrap();
/// assert_eq!(assemble_descriptor(blocks), vec![0.6, 0.8, 1.0, 0.0]);
/// ```
pub fn assemble_descriptor(blocks: Tensor2<f32>) -> Vec<f32> {
    blocks.into_vec()
}
