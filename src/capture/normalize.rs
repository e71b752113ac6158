use anyhow::{anyhow, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum PixelFormat {
    Yuyv,
    Rgb24,
}

/// Convert a captured buffer to an 8-bit luma plane.
pub(crate) fn normalize_to_luma(
    pixels: &[u8],
    width: u32,
    height: u32,
    format: PixelFormat,
) -> Result<Vec<u8>> {
    match format {
        PixelFormat::Yuyv => yuyv_to_luma(pixels, width, height),
        PixelFormat::Rgb24 => rgb24_to_luma(pixels, width, height),
    }
}

fn yuyv_to_luma(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| anyhow!("YUYV frame dimensions overflow"))?;
    let expected = pixel_count
        .checked_mul(2)
        .ok_or_else(|| anyhow!("YUYV frame dimensions overflow"))?;
    if pixels.len() != expected {
        return Err(anyhow!(
            "YUYV frame length mismatch: expected {}, got {}",
            expected,
            pixels.len()
        ));
    }

    // Y samples sit at every even byte of the packed YUYV stream.
    Ok(pixels.iter().step_by(2).copied().collect())
}

fn rgb24_to_luma(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>> {
    let pixel_count = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| anyhow!("RGB frame dimensions overflow"))?;
    let expected = pixel_count
        .checked_mul(3)
        .ok_or_else(|| anyhow!("RGB frame dimensions overflow"))?;
    if pixels.len() != expected {
        return Err(anyhow!(
            "RGB frame length mismatch: expected {}, got {}",
            expected,
            pixels.len()
        ));
    }

    let mut luma = vec![0u8; pixel_count];
    for (out, rgb) in luma.iter_mut().zip(pixels.chunks_exact(3)) {
        let y = 0.299_f32 * rgb[0] as f32 + 0.587_f32 * rgb[1] as f32 + 0.114_f32 * rgb[2] as f32;
        *out = y.round().clamp(0.0, 255.0) as u8;
    }
    Ok(luma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yuyv_extracts_y_samples() -> Result<()> {
        // Two pixels: Y0 U Y1 V
        let yuyv = vec![10u8, 128, 20, 128];
        let luma = normalize_to_luma(&yuyv, 2, 1, PixelFormat::Yuyv)?;
        assert_eq!(luma, vec![10, 20]);
        Ok(())
    }

    #[test]
    fn yuyv_validates_length() {
        assert!(normalize_to_luma(&[0u8; 5], 2, 1, PixelFormat::Yuyv).is_err());
    }

    #[test]
    fn rgb_gray_input_stays_gray() -> Result<()> {
        let rgb = vec![128u8; 12];
        let luma = normalize_to_luma(&rgb, 2, 2, PixelFormat::Rgb24)?;
        assert_eq!(luma, vec![128u8; 4]);
        Ok(())
    }
}
