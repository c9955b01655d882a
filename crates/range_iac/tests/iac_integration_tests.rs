//! Integration tests for image resolution and plans.

use std::fs;

use range_iac::{AmiResolver, IacError, InfraPlan, StaticImageTable};
use range_spec::{EnvironmentLayout, EnvironmentLoader, JumpFlavor};
use tempfile::tempdir;

const ENV: &str = r#"
name: red
prefix: rt
pod_count: 3
domain: red.range
aws_config:
  cidr: 10.20.0.0/16
  region: eu-west-1
  zone: eu-west-1a
included_networks: [dmz]
jump_hosts:
  cidr: 10.20.250.0/24
  windows:
    ami: ami-golden-windows
    count: 2
    size: t3.large
    scripts: [bootstrap.ps1]
  kali:
    count: 1
    size: t3.medium
"#;

#[test]
fn test_plan_from_disk() {
    let temp = tempdir().unwrap();
    let layout = EnvironmentLayout::new(temp.path(), "red").unwrap();
    fs::create_dir_all(layout.networks_dir()).unwrap();
    fs::create_dir_all(layout.hosts_dir()).unwrap();
    fs::write(layout.env_file(), ENV).unwrap();
    fs::write(layout.networks_dir().join("dmz.yml"), "included_hosts: [web, dns]\n").unwrap();
    fs::write(layout.hosts_dir().join("web.yml"), "tcp_ports: [22, 80]\n").unwrap();
    fs::write(layout.hosts_dir().join("dns.yml"), "tcp_ports: [53]\nudp_ports: [53]\n").unwrap();

    let env = EnvironmentLoader::new(temp.path()).load("red").unwrap();
    let table = StaticImageTable::builtin().unwrap();
    let images = AmiResolver::new(&table);

    assert_eq!(images.resolve_image(JumpFlavor::Windows, &env).unwrap(), "ami-golden-windows");
    assert_eq!(
        images.resolve_image(JumpFlavor::Kali, &env).unwrap(),
        table.get("ubuntu").unwrap().regions["eu-west-1"]
    );

    let plan = InfraPlan::build(&env, &layout, &images).unwrap();
    assert_eq!(plan.cidr, "10.20.0.0/16");
    assert_eq!(plan.pods.len(), 3);
    assert_eq!(plan.pods[2].networks["dmz"].hosts["dns"], "dns_rt2");
    assert_eq!(plan.tcp_ports.iter().copied().collect::<Vec<_>>(), vec![22, 53, 80]);
    assert_eq!(plan.udp_ports.iter().copied().collect::<Vec<_>>(), vec![53]);
    assert_eq!(plan.jump_hosts.len(), 2);
    assert_eq!(plan.terraform_file, layout.tf_file());

    let again = InfraPlan::build(&env, &layout, &images).unwrap();
    assert_eq!(plan, again);
}

#[test]
fn test_missing_region_without_override() {
    let mut env = range_spec::Environment::new("red");
    env.aws_config.region = "ap-south-9".to_string();
    env.jump_hosts.windows.ami = "ami-only-windows".to_string();

    let table = StaticImageTable::builtin().unwrap();
    let images = AmiResolver::new(&table);

    assert!(images.resolve_image(JumpFlavor::Windows, &env).is_ok());
    assert!(matches!(
        images.resolve_image(JumpFlavor::Kali, &env),
        Err(IacError::AmiLookup { .. })
    ));
}
