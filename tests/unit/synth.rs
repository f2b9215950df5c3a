use std::cell::RefCell;
use std::rc::Rc;

use super::*;

/// Paints every pixel with the first pose component as gray level.
struct GrayDecoder {
    size: Canvas,
    calls: Rc<RefCell<usize>>,
}

impl PoseDecoder for GrayDecoder {
    fn decode(&self, pose: &[f64]) -> StrokeposeResult<FrameRGBA> {
        *self.calls.borrow_mut() += 1;
        let v = pose[0].clamp(0.0, 255.0) as u8;
        Ok(FrameRGBA::filled(
            self.size.width,
            self.size.height,
            [v, v, v, 255],
        ))
    }
}

struct ShortBatch;

impl PoseDecoder for ShortBatch {
    fn decode(&self, _pose: &[f64]) -> StrokeposeResult<FrameRGBA> {
        Ok(FrameRGBA::white(1, 1))
    }

    fn decode_many(&self, _poses: &[Vec<f64>]) -> StrokeposeResult<Vec<FrameRGBA>> {
        Ok(vec![])
    }
}

fn canvas(width: u32, height: u32) -> Canvas {
    Canvas { width, height }
}

#[test]
fn decode_many_preserves_order_and_fits_size() {
    let calls = Rc::new(RefCell::new(0));
    let synth = FrameSynthesizer::new(
        Box::new(GrayDecoder {
            size: canvas(8, 4),
            calls: Rc::clone(&calls),
        }),
        2,
        canvas(4, 2),
    );

    let frames = synth
        .decode_many(&[vec![10.0, 0.0], vec![20.0, 0.0], vec![30.0, 0.0]])
        .unwrap();
    assert_eq!(*calls.borrow(), 3);
    let levels: Vec<u8> = frames.iter().map(|f| f.pixel(0, 0).unwrap()[0]).collect();
    assert_eq!(levels, vec![10, 20, 30]);
    assert!(frames.iter().all(|f| f.width == 4 && f.height == 2));
}

#[test]
fn wrong_pose_dimension_is_rejected_before_decoding() {
    let calls = Rc::new(RefCell::new(0));
    let synth = FrameSynthesizer::new(
        Box::new(GrayDecoder {
            size: canvas(2, 2),
            calls: Rc::clone(&calls),
        }),
        3,
        canvas(2, 2),
    );
    let err = synth
        .decode_many(&[vec![1.0, 2.0, 3.0], vec![1.0]])
        .unwrap_err();
    assert!(matches!(err, StrokeposeError::Validation(_)));
    assert_eq!(*calls.borrow(), 0);
    assert!(synth.decode(&[1.0]).is_err());
}

#[test]
fn short_batch_is_a_model_error() {
    let synth = FrameSynthesizer::new(Box::new(ShortBatch), 1, canvas(1, 1));
    let err = synth.decode_many(&[vec![0.0]]).unwrap_err();
    assert!(matches!(err, StrokeposeError::Model(_)));
}

#[test]
fn preprocess_maps_white_and_black_to_unit_range() {
    let white = preprocess_stroke(&FrameRGBA::white(16, 8), canvas(4, 2)).unwrap();
    assert_eq!(white.len(), 8);
    assert!(white.iter().all(|&v| (v - 1.0).abs() < 1e-9));

    let black = FrameRGBA::filled(16, 8, [0, 0, 0, 255]);
    let black = preprocess_stroke(&black, STROKE_INPUT).unwrap();
    assert_eq!(black.len(), 256 * 128);
    assert!(black.iter().all(|&v| (v + 1.0).abs() < 1e-9));
}
