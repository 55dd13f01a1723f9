//! The channel-planar run-length codec used by the 32-bit `is32`, `il32`,
//! `ih32` and `it32` elements.
//!
//! Each of the red, green and blue planes is compressed on its own.  A control
//! byte below 0x80 starts a literal run of `control + 1` bytes; a control byte
//! of 0x80 or above repeats the following byte `control - 125` times.  Alpha
//! is never stored here; it lives in the companion mask element.

/// Longest literal run a single control byte can describe.
const MAX_LITERAL_RUN: usize = 128;

/// Longest repeat run a single control byte can describe.
const MAX_REPEAT_RUN: usize = 130;

/// Inputs of at least this many bytes get four leading zero bytes, the
/// layout `it32` elements use.
const PREFIXED_DATA_LENGTH: usize = 65536;

#[derive(Clone, Copy, Eq, PartialEq)]
enum RunType {
    Literal,
    Repeat,
}

/// Compresses the first three channels of interleaved 4-byte pixels.
pub fn encode_rle24(data: &[u8]) -> Vec<u8> {
    let pixel_count = data.len() / 4;
    let mut output = Vec::with_capacity(data.len());
    if data.len() >= PREFIXED_DATA_LENGTH {
        output.extend_from_slice(&[0, 0, 0, 0]);
    }
    if pixel_count == 0 {
        return output;
    }

    let mut run = [0u8; MAX_REPEAT_RUN];
    for channel in 0..3 {
        let mut run_length = 1;
        let mut run_type = RunType::Literal;
        run[0] = data[channel];

        for pixel in 1..pixel_count {
            let byte = data[channel + pixel * 4];
            if run_length < 2 {
                run[run_length] = byte;
                run_length += 1;
            } else if run_length == 2 {
                run_type = if byte == run[1] && byte == run[0] {
                    RunType::Repeat
                } else {
                    RunType::Literal
                };
                run[run_length] = byte;
                run_length += 1;
            } else if run_type == RunType::Literal &&
                      run_length < MAX_LITERAL_RUN {
                if byte == run[run_length - 1] && byte == run[run_length - 2] {
                    // The last two literal bytes open the new repeat run.
                    flush_run(&mut output,
                              RunType::Literal,
                              &run[..run_length - 2]);
                    run[0] = run[run_length - 2];
                    run[1] = run[run_length - 1];
                    run[2] = byte;
                    run_length = 3;
                    run_type = RunType::Repeat;
                } else {
                    run[run_length] = byte;
                    run_length += 1;
                }
            } else if run_type == RunType::Repeat &&
                      run_length < MAX_REPEAT_RUN {
                if byte == run[run_length - 1] && byte == run[run_length - 2] {
                    run[run_length] = byte;
                    run_length += 1;
                } else {
                    flush_run(&mut output, run_type, &run[..run_length]);
                    run[0] = byte;
                    run_length = 1;
                    run_type = RunType::Literal;
                }
            } else {
                flush_run(&mut output, run_type, &run[..run_length]);
                run[0] = byte;
                run_length = 1;
                run_type = RunType::Literal;
            }
        }
        flush_run(&mut output, run_type, &run[..run_length]);
    }
    output
}

fn flush_run(output: &mut Vec<u8>, run_type: RunType, run: &[u8]) {
    match run_type {
        RunType::Literal => {
            output.push((run.len() - 1) as u8);
            output.extend_from_slice(run);
        }
        RunType::Repeat => {
            output.push((run.len() + 125) as u8);
            output.push(run[0]);
        }
    }
}

/// Expands RLE24 data into `pixel_count` interleaved 4-byte pixels.  The
/// fourth byte of every pixel is left at zero.
///
/// Each plane stops as soon as `pixel_count` pixels are filled, so trailing
/// bytes are ignored.  Truncated input leaves the remaining pixels zeroed.
pub fn decode_rle24(data: &[u8], pixel_count: usize) -> Vec<u8> {
    let mut output = vec![0u8; pixel_count * 4];
    let mut offset = 0;
    if pixel_count * 4 >= PREFIXED_DATA_LENGTH && data.len() >= 4 &&
       data[..4] == [0, 0, 0, 0] {
        offset = 4;
    }

    for channel in 0..3 {
        let mut pixel = 0;
        while pixel < pixel_count && offset < data.len() {
            let control = data[offset];
            offset += 1;
            if control & 0x80 == 0 {
                let run_length = control as usize + 1;
                let mut i = 0;
                while i < run_length && pixel < pixel_count &&
                      offset < data.len() {
                    output[pixel * 4 + channel] = data[offset];
                    pixel += 1;
                    offset += 1;
                    i += 1;
                }
            } else {
                let run_length = control as usize - 125;
                let value = match data.get(offset) {
                    Some(&value) => value,
                    None => break,
                };
                offset += 1;
                let end = (pixel + run_length).min(pixel_count);
                while pixel < end {
                    output[pixel * 4 + channel] = value;
                    pixel += 1;
                }
            }
        }
    }
    output
}
