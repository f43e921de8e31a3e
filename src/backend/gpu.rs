//! GPU renderer: the song kernel as a wgpu compute shader.

use bytemuck::{Pod, Zeroable};
use log::{debug, info};
use wgpu::util::DeviceExt;

use crate::params::{song_constants::NUM_THREADS_PER_GROUP, SongConfig};
use crate::synth::MELODY;

/// Kernel source; `{{NOTE_COUNT}}` and `{{MELODY}}` are filled from the melody table
const SHADER_TEMPLATE: &str = include_str!("song.wgsl");

/// Uniform block of the kernel (matches `SongUniforms` in song.wgsl)
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct SongUniforms {
    /// Sample rate (Hz)
    pub num_samples: u32,
    /// Duration (seconds)
    pub duration: u32,
    pub t0: u32,
    pub t1: u32,
}

impl From<&SongConfig> for SongUniforms {
    fn from(config: &SongConfig) -> Self {
        Self {
            num_samples: config.sample_rate_hz,
            duration: config.duration_s,
            t0: config.t0,
            t1: config.t1,
        }
    }
}

/// WGSL source with the melody table spliced in
pub fn shader_source() -> String {
    let melody = MELODY
        .iter()
        .map(|e| format!("    vec2<f32>({}.0, {}.0)", e.delay_units, e.pitch))
        .collect::<Vec<_>>()
        .join(",\n");

    SHADER_TEMPLATE
        .replace("{{NOTE_COUNT}}", &MELODY.len().to_string())
        .replace("{{MELODY}}", &melody)
}

/// Workgroups needed to cover `total_samples` frames
pub fn workgroup_count(total_samples: usize) -> u32 {
    total_samples.div_ceil(NUM_THREADS_PER_GROUP as usize) as u32
}

/// Compute system owning the wgpu device and the compiled song pipeline
pub struct ComputeSystem {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::ComputePipeline,
    bind_group_layout: wgpu::BindGroupLayout,
}

impl ComputeSystem {
    /// Acquire a headless device and compile the kernel
    pub async fn new() -> Result<Self, String> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok_or("Failed to find GPU adapter")?;

        info!("GPU: {} ({:?})", adapter.get_info().name, adapter.get_info().backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Song Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await
            .map_err(|e| format!("Failed to create device: {}", e))?;

        // Catch shader/pipeline validation errors instead of the default panic
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Song Compute Shader"),
            source: wgpu::ShaderSource::Wgsl(shader_source().into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Song Bind Group Layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Song Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Song Compute Pipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some("cs_main"),
            compilation_options: Default::default(),
            cache: None,
        });

        if let Some(err) = device.pop_error_scope().await {
            return Err(format!("Failed to compile song kernel: {}", err));
        }

        Ok(Self {
            device,
            queue,
            pipeline,
            bind_group_layout,
        })
    }

    /// Run the kernel once per frame and read the packed frames back
    pub async fn render(&self, config: &SongConfig) -> Result<Vec<u32>, String> {
        config
            .validate()
            .map_err(|e| format!("Invalid song config: {}", e))?;

        let total = config.total_samples();
        let groups = workgroup_count(total);
        let limits = self.device.limits();
        if groups > limits.max_compute_workgroups_per_dimension {
            return Err(format!(
                "Song needs {} workgroups, device allows {}",
                groups, limits.max_compute_workgroups_per_dimension
            ));
        }

        let output_size = (total * std::mem::size_of::<u32>()) as u64;
        if output_size > limits.max_storage_buffer_binding_size as u64 {
            return Err(format!(
                "Output buffer of {} bytes exceeds device storage binding limit of {}",
                output_size, limits.max_storage_buffer_binding_size
            ));
        }

        debug!(
            "Dispatch: {} frames, {} workgroups x {} threads",
            total, groups, NUM_THREADS_PER_GROUP
        );

        let output_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Frame Buffer"),
            size: output_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });

        let staging_buffer = self.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Staging Buffer"),
            size: output_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniforms = SongUniforms::from(config);
        let uniform_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Song Uniform Buffer"),
                contents: bytemuck::cast_slice(&[uniforms]),
                usage: wgpu::BufferUsages::UNIFORM,
            });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Song Bind Group"),
            layout: &self.bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: output_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Song Encoder"),
            });

        {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Song Compute Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.pipeline);
            compute_pass.set_bind_group(0, &bind_group, &[]);
            compute_pass.dispatch_workgroups(groups, 1, 1);
        }

        encoder.copy_buffer_to_buffer(&output_buffer, 0, &staging_buffer, 0, output_size);
        self.queue.submit(Some(encoder.finish()));

        // Read back results
        let buffer_slice = staging_buffer.slice(..);
        let (sender, receiver) = futures::channel::oneshot::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });

        self.device.poll(wgpu::Maintain::Wait);
        receiver
            .await
            .map_err(|e| format!("Readback cancelled: {}", e))?
            .map_err(|e| format!("Failed to map staging buffer: {}", e))?;

        let data = buffer_slice.get_mapped_range();
        let frames: Vec<u32> = bytemuck::cast_slice(&data).to_vec();

        drop(data);
        staging_buffer.unmap();

        Ok(frames)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{compare, cpu};

    #[test]
    fn test_uniform_layout() {
        // Four u32 fields, 16-byte uniform block
        assert_eq!(std::mem::size_of::<SongUniforms>(), 16);

        let uniforms = SongUniforms::from(&SongConfig::default());
        assert_eq!(uniforms.num_samples, 28160);
        assert_eq!(uniforms.duration, 60);
        assert_eq!(uniforms.t0, 0);
        assert_eq!(uniforms.t1, 0);
    }

    #[test]
    fn test_shader_source_has_melody() {
        let source = shader_source();
        assert!(!source.contains("{{"));
        assert!(source.contains("const NOTE_COUNT: u32 = 60u;"));
        assert!(source.contains("vec2<f32>(10.0, 71.0)"));
        assert!(source.matches("vec2<f32>(").count() >= MELODY.len());
    }

    #[test]
    fn test_workgroup_count_covers_tail() {
        assert_eq!(workgroup_count(256), 1);
        assert_eq!(workgroup_count(257), 2);
        assert_eq!(workgroup_count(28160 * 60), 6600);
    }

    #[test]
    fn test_gpu_matches_cpu() {
        let system = match pollster::block_on(ComputeSystem::new()) {
            Ok(system) => system,
            Err(e) => {
                eprintln!("Skipping GPU comparison: {}", e);
                return;
            }
        };

        // Odd frame count leaves a partial final workgroup
        let config = SongConfig::new(8001, 4);
        let gpu = pollster::block_on(system.render(&config)).unwrap();
        let cpu = cpu::render(&config).unwrap();

        assert_eq!(gpu.len(), cpu.len());

        // Lead-in is exact silence on both
        let lead_in = (1.7 * config.sample_rate_hz as f32) as usize;
        assert!(gpu[..lead_in].iter().all(|&f| f == 0));

        let deviation = compare(&gpu, &cpu);
        assert!(
            deviation.max_left <= 512 && deviation.max_right <= 512,
            "GPU and CPU diverge: {:?}",
            deviation
        );
    }
}
