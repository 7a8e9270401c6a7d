#![doc = env!("CARGO_PKG_DESCRIPTION")]

#[doc(inline)]
pub use hogrs_tensor as tensor;

#[doc(inline)]
pub use hogrs_image as image;

#[doc(inline)]
pub use hogrs_imgproc as imgproc;

#[doc(inline)]
pub use hogrs_io as io;
