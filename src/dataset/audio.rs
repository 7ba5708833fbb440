use std::fs;
use std::path::Path;

use super::DataPreparator;
use crate::config::SampleRatePolicy;
use crate::error::{NoiseUtilsError, Result};
use crate::signal_processing::peak_normalize;
use crate::synthesis::NoiseSource;
use crate::wav::{Audio, load_wav, load_wav_at, save_wav};

/// Audio files of one directory, in listing order
#[derive(Debug, Clone, Default)]
pub struct LoadedDirectory {
    pub audio: Vec<Vec<f32>>,
    pub file_names: Vec<String>,
    /// Rate of the last file loaded, 0 for an empty directory
    pub sample_rate: u32,
}

/// Result of a directory batch
#[derive(Debug, Clone, Default)]
pub struct NoisedAudios {
    pub noisy: Vec<Vec<f32>>,
    pub clean: Vec<Vec<f32>>,
    pub sample_rate: u32,
}

impl DataPreparator {
    /// Load a file at the configured `load_sample_rate`, or at its own rate
    /// when none is set
    pub fn load_file<P: AsRef<Path>>(&self, path: P) -> Result<Audio> {
        load_wav_at(path, self.audio.load_sample_rate)
    }

    /// Write mono samples in the configured output format
    pub fn save_audio<P: AsRef<Path>>(
        &self,
        audio: &[f32],
        path: P,
        sample_rate: u32,
    ) -> Result<()> {
        save_wav(path, audio, sample_rate, self.audio.output_format)
    }

    fn distort<S>(&self, source: &mut S, samples: &[f32], noise_level: f32) -> Result<Vec<f32>>
    where
        S: NoiseSource + ?Sized,
    {
        let mut noisy = source.apply(samples, Some(noise_level))?.signal;
        peak_normalize(&mut noisy);
        Ok(noisy)
    }

    /// Load one file, distort it and write the result at the file's own
    /// sample rate
    ///
    /// `noise_level` falls back to the configured `noise_level`. The file is
    /// never resampled.
    pub fn generate_noised_audio<S, P, Q>(
        &self,
        input_path: P,
        output_path: Q,
        source: &mut S,
        noise_level: Option<f32>,
    ) -> Result<Audio>
    where
        S: NoiseSource + ?Sized,
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let level = noise_level.unwrap_or(self.audio.noise_level);
        let clean = load_wav(input_path)?;
        let noisy = self.distort(source, &clean.samples, level)?;
        self.save_audio(&noisy, output_path, clean.sample_rate)?;

        Ok(Audio {
            samples: noisy,
            sample_rate: clean.sample_rate,
        })
    }

    /// Load every regular file of `dir` (non-recursive)
    ///
    /// Any file that fails to decode aborts the whole load.
    pub fn load_files_from_directory<P: AsRef<Path>>(&self, dir: P) -> Result<LoadedDirectory> {
        let dir = dir.as_ref();
        let mut loaded = LoadedDirectory::default();
        let mut first_rate: Option<u32> = None;

        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            let audio = self.load_file(&path)?;

            match first_rate {
                None => first_rate = Some(audio.sample_rate),
                Some(expected) if expected != audio.sample_rate => {
                    match self.audio.sample_rate_policy {
                        SampleRatePolicy::RequireUniform => {
                            return Err(NoiseUtilsError::MixedSampleRates {
                                file: name,
                                expected,
                                found: audio.sample_rate,
                            });
                        }
                        SampleRatePolicy::LastWins => log::warn!(
                            "{} is {} Hz, expected {} Hz",
                            name,
                            audio.sample_rate,
                            expected
                        ),
                    }
                }
                Some(_) => {}
            }

            loaded.sample_rate = audio.sample_rate;
            loaded.audio.push(audio.samples);
            loaded.file_names.push(name);
        }

        log::info!(
            "Loaded {} files from {}",
            loaded.file_names.len(),
            dir.display()
        );
        Ok(loaded)
    }

    /// Distort every file of `input_dir` into `output_dir` under the same name
    ///
    /// Files are written at the directory sample rate and every file gets
    /// the same `noise_level`, falling back to the configured one. Files
    /// already written stay in place if a later one fails.
    pub fn generate_noised_audios<S, P, Q>(
        &self,
        input_dir: P,
        output_dir: Q,
        source: &mut S,
        noise_level: Option<f32>,
    ) -> Result<NoisedAudios>
    where
        S: NoiseSource + ?Sized,
        P: AsRef<Path>,
        Q: AsRef<Path>,
    {
        let level = noise_level.unwrap_or(self.audio.noise_level);
        let loaded = self.load_files_from_directory(input_dir)?;
        let output_dir = output_dir.as_ref();
        fs::create_dir_all(output_dir)?;

        let total = loaded.file_names.len();
        let mut noisy_audios = Vec::with_capacity(total);

        for (index, (samples, name)) in loaded.audio.iter().zip(&loaded.file_names).enumerate() {
            let noisy = self.distort(source, samples, level)?;
            self.save_audio(&noisy, output_dir.join(name), loaded.sample_rate)?;
            noisy_audios.push(noisy);
            log::info!("Noised {}/{}: {}", index + 1, total, name);
        }

        Ok(NoisedAudios {
            noisy: noisy_audios,
            clean: loaded.audio,
            sample_rate: loaded.sample_rate,
        })
    }
}
